//! Cluster reference resolution.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::action::{self, Action};
use crate::client::{add_cell_dep_infos, find_cluster, Client, Signer};
use crate::config::ProtocolConfig;
use crate::error::{Result, SporeError};
use crate::types::{Byte32, CellDep, CellOutput, Transaction};

/// How a referenced cluster is brought into a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterMode {
    /// Nothing is added; control of the cluster is proven elsewhere.
    Skip,
    /// A cell under the cluster's lock is consumed and one is produced;
    /// the cluster cell itself is only a cell dep.
    LockProxy,
    /// The cluster cell is consumed and reproduced unchanged.
    ClusterCell,
}

impl ClusterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::LockProxy => "lockProxy",
            Self::ClusterCell => "clusterCell",
        }
    }
}

impl fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterMode {
    type Err = SporeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(Self::Skip),
            "lockProxy" | "lock-proxy" => Ok(Self::LockProxy),
            "clusterCell" | "cluster-cell" => Ok(Self::ClusterCell),
            other => Err(SporeError::InvalidConfig(format!(
                "unknown cluster mode {other:?}"
            ))),
        }
    }
}

/// Make the skeleton valid with respect to `cluster_id`.
///
/// Idempotent against one skeleton: resolving the same cluster again adds
/// no inputs, outputs or cell deps. Returns the actions produced: a
/// TransferCluster in `ClusterCell` mode when the cluster's script version
/// takes cobuild proofs, nothing otherwise.
pub async fn resolve_cluster<S: Signer>(
    signer: &S,
    config: &ProtocolConfig,
    tx: &mut Transaction,
    cluster_id: &Byte32,
    mode: ClusterMode,
) -> Result<Vec<Action>> {
    debug!("resolving cluster {cluster_id} via {mode}");
    match mode {
        ClusterMode::Skip => Ok(Vec::new()),
        ClusterMode::LockProxy => {
            include_lock_proxy(signer.client(), config, tx, cluster_id).await?;
            Ok(Vec::new())
        }
        ClusterMode::ClusterCell => include_cluster_cell(signer.client(), config, tx, cluster_id).await,
    }
}

async fn include_lock_proxy<C: Client + ?Sized>(
    client: &C,
    config: &ProtocolConfig,
    tx: &mut Transaction,
    cluster_id: &Byte32,
) -> Result<()> {
    let (cluster, _) = find_cluster(client, config, cluster_id).await?;
    tx.add_cell_dep(CellDep::code(cluster.out_point));
    let lock = cluster.output.lock;

    if tx.find_input_index_by_lock(&lock).is_none() {
        let proxy = client
            .find_cells_by_lock(&lock)
            .await?
            .into_iter()
            .find(|cell| cell.is_spare() && !tx.has_input(&cell.out_point))
            .ok_or(SporeError::LockProxyNotFound(*cluster_id))?;
        tx.add_input(proxy);
    }

    if tx.find_output_index_by_lock(&lock).is_none() {
        tx.add_output(CellOutput::occupied(lock, None, &[]), Vec::new());
    }
    Ok(())
}

async fn include_cluster_cell<C: Client + ?Sized>(
    client: &C,
    config: &ProtocolConfig,
    tx: &mut Transaction,
    cluster_id: &Byte32,
) -> Result<Vec<Action>> {
    let (cluster, script) = find_cluster(client, config, cluster_id).await?;
    if tx.has_input(&cluster.out_point) {
        debug!("cluster {cluster_id} already consumed");
        return Ok(Vec::new());
    }
    add_cell_dep_infos(client, tx, &script.cell_deps).await?;

    let output = cluster.output.clone();
    let data = cluster.data.clone();
    tx.add_input(cluster);
    tx.add_output(output.clone(), data);

    if !script.cobuild {
        return Ok(Vec::new());
    }
    let proof = action::transfer_cluster(config.script_info_hash, &output, &output)?;
    Ok(vec![proof])
}
