//! Spore engine.
//!
//! Every call threads one owned skeleton through a sequential loop over
//! the requested spores and finishes through a single `finalize`.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::action;
use crate::client::{find_spore, Signer};
use crate::cluster::{resolve_cluster, ClusterMode};
use crate::config::ProtocolConfig;
use crate::error::{Result, SporeError};
use crate::id::derive_type_id;
use crate::lifecycle::{
    consume_entity, ensure_distinct, ensure_funding_input, finalize, CellDepInfoSet, CreateOutcome,
    DefaultLock,
};
use crate::types::{Byte32, CellOutput, Transaction};

use super::types::{SporeSpec, SporeTransfer};

/// Create spores under script `version` (latest when `None`).
///
/// Spores that name a cluster need `cluster_mode`; each distinct cluster
/// is resolved once, in first-seen order, before any identifier is
/// derived. Returned ids line up with `spores`.
///
/// # Errors
///
/// `ClusterModeRequired` is raised before the skeleton is touched.
pub async fn create_spores<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    spores: Vec<SporeSpec>,
    cluster_mode: Option<ClusterMode>,
    version: Option<&str>,
    tx: Option<Transaction>,
) -> Result<CreateOutcome> {
    let script = config.spore_script(version)?;

    let mut clusters = Vec::new();
    let mut seen = BTreeSet::new();
    for spore in &spores {
        let Some(cluster_id) = spore.data.cluster_id else {
            continue;
        };
        if cluster_mode.is_none() {
            return Err(SporeError::ClusterModeRequired(cluster_id));
        }
        if seen.insert(cluster_id) {
            clusters.push(cluster_id);
        }
    }

    let mut tx = tx.unwrap_or_default();
    ensure_funding_input(signer, &mut tx).await?;

    let mut actions = Vec::new();
    if let Some(mode) = cluster_mode {
        for cluster_id in &clusters {
            actions.extend(resolve_cluster(signer, config, &mut tx, cluster_id, mode).await?);
        }
    }
    let cobuild = script.cobuild || !actions.is_empty();

    let mut cell_deps = CellDepInfoSet::default();
    cell_deps.extend(&script.cell_deps);
    let mut default_lock = DefaultLock::default();
    let mut ids = Vec::with_capacity(spores.len());

    for spore in spores {
        let id = derive_type_id(&tx, tx.outputs.len())?;
        let lock = match spore.to {
            Some(lock) => lock,
            None => default_lock.get(signer).await?,
        };
        let data = spore.data.pack();
        let output = CellOutput::occupied(lock, Some(script.type_script(&id)), &data);
        actions.push(action::create_spore(config.script_info_hash, &output, &data)?);
        debug!("spore {id} at output {}", tx.outputs.len());
        tx.add_output(output, data);
        ids.push(id);
    }

    info!(
        "created {} spores under {} ({} clusters resolved)",
        ids.len(),
        script.version,
        clusters.len()
    );
    let tx = finalize(signer, tx, cell_deps, actions, cobuild).await?;
    Ok(CreateOutcome { tx, ids })
}

/// Move spores to new owners, keeping their type and content.
///
/// # Errors
///
/// `DuplicateEntity` when a spore is listed twice, or is already an input
/// of `tx`.
pub async fn transfer_spores<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    transfers: Vec<SporeTransfer>,
    tx: Option<Transaction>,
) -> Result<Transaction> {
    ensure_distinct(transfers.iter().map(|transfer| &transfer.id))?;
    let mut tx = tx.unwrap_or_default();
    let mut cell_deps = CellDepInfoSet::default();
    let mut actions = Vec::with_capacity(transfers.len());
    let mut cobuild = false;

    for transfer in transfers {
        let (cell, script) = find_spore(signer.client(), config, &transfer.id).await?;
        cobuild |= script.cobuild;
        cell_deps.extend(&script.cell_deps);

        let before = cell.output.clone();
        let after = before.with_lock(transfer.to, cell.data.len());
        let data = cell.data.clone();
        consume_entity(&mut tx, &transfer.id, cell)?;
        tx.add_output(after.clone(), data);
        actions.push(action::transfer_spore(config.script_info_hash, &before, &after)?);
    }

    info!("transferred {} spores", actions.len());
    finalize(signer, tx, cell_deps, actions, cobuild).await
}

/// Consume spores without reproducing them. Their capacity is left for
/// the caller's balancing step.
pub async fn melt_spores<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    ids: Vec<Byte32>,
    tx: Option<Transaction>,
) -> Result<Transaction> {
    ensure_distinct(&ids)?;
    let mut tx = tx.unwrap_or_default();
    let mut cell_deps = CellDepInfoSet::default();
    let mut actions = Vec::with_capacity(ids.len());
    let mut cobuild = false;

    for id in ids {
        let (cell, script) = find_spore(signer.client(), config, &id).await?;
        cobuild |= script.cobuild;
        cell_deps.extend(&script.cell_deps);

        actions.push(action::melt_spore(config.script_info_hash, &cell.output)?);
        consume_entity(&mut tx, &id, cell)?;
    }

    info!("melted {} spores", actions.len());
    finalize(signer, tx, cell_deps, actions, cobuild).await
}
