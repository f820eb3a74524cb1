//! Cluster creation and transfer.

use log::info;

use crate::action;
use crate::client::{find_cluster, Signer};
use crate::config::ProtocolConfig;
use crate::error::Result;
use crate::id::derive_type_id;
use crate::lifecycle::{
    consume_entity, ensure_distinct, ensure_funding_input, finalize, CellDepInfoSet, CreateOutcome,
    DefaultLock,
};
use crate::types::{CellOutput, Transaction};

use super::types::{ClusterSpec, ClusterTransfer};

/// Create clusters under script `version` (latest when `None`).
pub async fn create_clusters<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    clusters: Vec<ClusterSpec>,
    version: Option<&str>,
    tx: Option<Transaction>,
) -> Result<CreateOutcome> {
    let script = config.cluster_script(version)?;
    let mut tx = tx.unwrap_or_default();
    ensure_funding_input(signer, &mut tx).await?;

    let mut cell_deps = CellDepInfoSet::default();
    cell_deps.extend(&script.cell_deps);
    let mut default_lock = DefaultLock::default();
    let mut actions = Vec::with_capacity(clusters.len());
    let mut ids = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let id = derive_type_id(&tx, tx.outputs.len())?;
        let lock = match cluster.to {
            Some(lock) => lock,
            None => default_lock.get(signer).await?,
        };
        let data = cluster.data.pack();
        let output = CellOutput::occupied(lock, Some(script.type_script(&id)), &data);
        actions.push(action::create_cluster(config.script_info_hash, &output, &data)?);
        tx.add_output(output, data);
        ids.push(id);
    }

    info!("created {} clusters under {}", ids.len(), script.version);
    let tx = finalize(signer, tx, cell_deps, actions, script.cobuild).await?;
    Ok(CreateOutcome { tx, ids })
}

/// Move clusters to new owners, keeping their type and data.
///
/// A cluster listed twice, or already an input of `tx`, fails with
/// `DuplicateEntity`.
pub async fn transfer_clusters<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    transfers: Vec<ClusterTransfer>,
    tx: Option<Transaction>,
) -> Result<Transaction> {
    ensure_distinct(transfers.iter().map(|transfer| &transfer.id))?;
    let mut tx = tx.unwrap_or_default();
    let mut cell_deps = CellDepInfoSet::default();
    let mut actions = Vec::with_capacity(transfers.len());
    let mut cobuild = false;

    for transfer in transfers {
        let (cell, script) = find_cluster(signer.client(), config, &transfer.id).await?;
        cobuild |= script.cobuild;
        cell_deps.extend(&script.cell_deps);

        let before = cell.output.clone();
        let after = before.with_lock(transfer.to, cell.data.len());
        let data = cell.data.clone();
        consume_entity(&mut tx, &transfer.id, cell)?;
        tx.add_output(after.clone(), data);
        actions.push(action::transfer_cluster(
            config.script_info_hash,
            &before,
            &after,
        )?);
    }

    info!("transferred {} clusters", actions.len());
    finalize(signer, tx, cell_deps, actions, cobuild).await
}
