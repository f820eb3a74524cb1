//! Chain access consumed from the client library.
//!
//! Implementations wrap an RPC/indexer client and a wallet. They report
//! their own failures as `SporeError::Backend`; nothing here retries.

use async_trait::async_trait;
use log::debug;

use crate::config::{ProtocolConfig, ScriptInfo};
use crate::error::{Result, SporeError};
use crate::types::{Byte32, Cell, CellDep, CellDepInfo, Script, Transaction};

/// Read-only live-cell queries.
#[async_trait]
pub trait Client: Send + Sync {
    /// The live cell carrying `type_script`, if any.
    async fn find_singleton_cell_by_type(&self, type_script: &Script) -> Result<Option<Cell>>;

    /// Live cells locked by `lock`.
    async fn find_cells_by_lock(&self, lock: &Script) -> Result<Vec<Cell>>;
}

/// The connected account.
#[async_trait]
pub trait Signer: Send + Sync {
    type Client: Client;

    fn client(&self) -> &Self::Client;

    /// Lock that new cells default to.
    async fn recommended_lock(&self) -> Result<Script>;

    /// The account's own live cells.
    async fn find_cells(&self) -> Result<Vec<Cell>>;

    /// Generic preparation (witness placeholders and the like) for a
    /// transaction that carries no cobuild proof.
    async fn prepare_transaction(&self, tx: Transaction) -> Result<Transaction>;
}

/// Resolve a configured cell dep to a concrete one.
pub async fn resolve_cell_dep<C: Client + ?Sized>(client: &C, info: &CellDepInfo) -> Result<CellDep> {
    let Some(type_script) = &info.type_script else {
        return Ok(info.cell_dep.clone());
    };
    let cell = client
        .find_singleton_cell_by_type(type_script)
        .await?
        .ok_or_else(|| SporeError::CellDepNotFound(type_script.hash()))?;
    Ok(CellDep {
        out_point: cell.out_point,
        dep_type: info.cell_dep.dep_type,
    })
}

/// Resolve and register cell deps on the skeleton.
pub async fn add_cell_dep_infos<'a, C, I>(client: &C, tx: &mut Transaction, infos: I) -> Result<()>
where
    C: Client + ?Sized,
    I: IntoIterator<Item = &'a CellDepInfo>,
{
    for info in infos {
        let dep = resolve_cell_dep(client, info).await?;
        tx.add_cell_dep(dep);
    }
    Ok(())
}

/// Find a live entity cell by identifier across the given script versions,
/// newest first.
async fn find_entity<'a, C: Client + ?Sized>(
    client: &C,
    scripts: &'a [ScriptInfo],
    id: &Byte32,
) -> Result<Option<(Cell, &'a ScriptInfo)>> {
    for info in scripts.iter().rev() {
        if let Some(cell) = client
            .find_singleton_cell_by_type(&info.type_script(id))
            .await?
        {
            debug!("found {id} under script version {}", info.version);
            return Ok(Some((cell, info)));
        }
    }
    Ok(None)
}

/// Live spore cell for `id` and the script version it was minted under.
pub async fn find_spore<'a, C: Client + ?Sized>(
    client: &C,
    config: &'a ProtocolConfig,
    id: &Byte32,
) -> Result<(Cell, &'a ScriptInfo)> {
    find_entity(client, &config.spore, id)
        .await?
        .ok_or(SporeError::SporeNotFound(*id))
}

/// Live cluster cell for `id` and the script version it was created under.
pub async fn find_cluster<'a, C: Client + ?Sized>(
    client: &C,
    config: &'a ProtocolConfig,
    id: &Byte32,
) -> Result<(Cell, &'a ScriptInfo)> {
    find_entity(client, &config.cluster, id)
        .await?
        .ok_or(SporeError::ClusterNotFound(*id))
}
