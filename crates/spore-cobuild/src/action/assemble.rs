//! Action assembly from cell images.
//!
//! Each function is pure: it reads the type script of the cell it
//! describes, takes the entity identifier from the type args and returns
//! an [`Action`] addressed to that type script's hash. A cell without a
//! type script is a caller error.

use crate::error::{Result, SporeError};
use crate::hash;
use crate::types::{Byte32, CellOutput, Script};

use super::types::{Action, SporeAction};

/// Type script and entity identifier of an entity cell.
fn entity_of(output: &CellOutput) -> Result<(&Script, Byte32)> {
    let type_script = output.type_.as_ref().ok_or(SporeError::MissingTypeScript)?;
    let id = Byte32::from_slice(&type_script.args)
        .map_err(|_| SporeError::InvalidTypeArgs(type_script.args.len()))?;
    Ok((type_script, id))
}

/// Entity of a before/after pair, which must share one type script.
fn transition_of<'a>(
    before: &'a CellOutput,
    after: &CellOutput,
) -> Result<(&'a Script, Byte32)> {
    let (type_script, id) = entity_of(before)?;
    let (after_type, _) = entity_of(after)?;
    if type_script != after_type {
        return Err(SporeError::TypeMismatch {
            before: type_script.hash(),
            after: after_type.hash(),
        });
    }
    Ok((type_script, id))
}

/// CreateSpore for a newly produced spore cell carrying `data`.
pub fn create_spore(script_info_hash: Byte32, output: &CellOutput, data: &[u8]) -> Result<Action> {
    let (type_script, spore_id) = entity_of(output)?;
    let action = SporeAction::CreateSpore {
        spore_id,
        to: output.lock.clone().into(),
        data_hash: hash::blake2b_256(data),
    };
    Ok(Action::new(script_info_hash, type_script.hash(), &action))
}

/// TransferSpore from the consumed image to the produced one.
pub fn transfer_spore(
    script_info_hash: Byte32,
    before: &CellOutput,
    after: &CellOutput,
) -> Result<Action> {
    let (type_script, spore_id) = transition_of(before, after)?;
    let action = SporeAction::TransferSpore {
        spore_id,
        from: before.lock.clone().into(),
        to: after.lock.clone().into(),
    };
    Ok(Action::new(script_info_hash, type_script.hash(), &action))
}

/// MeltSpore for a consumed spore cell.
pub fn melt_spore(script_info_hash: Byte32, before: &CellOutput) -> Result<Action> {
    let (type_script, spore_id) = entity_of(before)?;
    let action = SporeAction::MeltSpore {
        spore_id,
        from: before.lock.clone().into(),
    };
    Ok(Action::new(script_info_hash, type_script.hash(), &action))
}

/// CreateCluster for a newly produced cluster cell carrying `data`.
pub fn create_cluster(
    script_info_hash: Byte32,
    output: &CellOutput,
    data: &[u8],
) -> Result<Action> {
    let (type_script, cluster_id) = entity_of(output)?;
    let action = SporeAction::CreateCluster {
        cluster_id,
        to: output.lock.clone().into(),
        data_hash: hash::blake2b_256(data),
    };
    Ok(Action::new(script_info_hash, type_script.hash(), &action))
}

/// TransferCluster from the consumed image to the produced one.
pub fn transfer_cluster(
    script_info_hash: Byte32,
    before: &CellOutput,
    after: &CellOutput,
) -> Result<Action> {
    let (type_script, cluster_id) = transition_of(before, after)?;
    let action = SporeAction::TransferCluster {
        cluster_id,
        from: before.lock.clone().into(),
        to: after.lock.clone().into(),
    };
    Ok(Action::new(script_info_hash, type_script.hash(), &action))
}
