//! Steps shared by every lifecycle operation.

use std::collections::HashSet;

use log::{debug, info};

use crate::action::Action;
use crate::client::{add_cell_dep_infos, Signer};
use crate::error::{Result, SporeError};
use crate::types::{Byte32, Cell, CellDepInfo, Script, Transaction};
use crate::witness;

/// Result of a create call.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub tx: Transaction,
    /// Identifiers of the new entities, aligned with the request list.
    pub ids: Vec<Byte32>,
}

/// Cell dep infos accumulated over a call, deduplicated by canonical bytes
/// and kept in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct CellDepInfoSet {
    seen: HashSet<Vec<u8>>,
    items: Vec<CellDepInfo>,
}

impl CellDepInfoSet {
    pub(crate) fn extend<'a>(&mut self, infos: impl IntoIterator<Item = &'a CellDepInfo>) {
        for info in infos {
            if self.seen.insert(info.key()) {
                self.items.push(info.clone());
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

/// The signer's recommended lock, fetched on first use.
#[derive(Debug, Default)]
pub(crate) struct DefaultLock(Option<Script>);

impl DefaultLock {
    pub(crate) async fn get<S: Signer>(&mut self, signer: &S) -> Result<Script> {
        if let Some(lock) = &self.0 {
            return Ok(lock.clone());
        }
        let lock = signer.recommended_lock().await?;
        self.0 = Some(lock.clone());
        Ok(lock)
    }
}

/// Reject a request list that names the same entity twice.
pub(crate) fn ensure_distinct<'a>(ids: impl IntoIterator<Item = &'a Byte32>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(SporeError::DuplicateEntity(*id));
        }
    }
    Ok(())
}

/// Consume `cell` as the live cell of entity `id`, unless the skeleton
/// already spends it.
pub(crate) fn consume_entity(tx: &mut Transaction, id: &Byte32, cell: Cell) -> Result<usize> {
    if tx.has_input(&cell.out_point) {
        return Err(SporeError::DuplicateEntity(*id));
    }
    Ok(tx.add_input(cell))
}

/// Make sure the skeleton has at least one input, taking a spare cell of
/// the signer's if it has none.
pub(crate) async fn ensure_funding_input<S: Signer>(signer: &S, tx: &mut Transaction) -> Result<()> {
    if !tx.inputs.is_empty() {
        return Ok(());
    }
    let cell = signer
        .find_cells()
        .await?
        .into_iter()
        .find(|cell| cell.is_spare())
        .ok_or(SporeError::NoFundingCell)?;
    debug!("funding input injected");
    tx.add_input(cell);
    Ok(())
}

/// Register outstanding cell deps, then either bind the actions through the
/// cobuild witness or hand the skeleton to the signer's generic preparation.
///
/// Runs once per top-level call.
pub(crate) async fn finalize<S: Signer>(
    signer: &S,
    mut tx: Transaction,
    cell_deps: CellDepInfoSet,
    actions: Vec<Action>,
    cobuild: bool,
) -> Result<Transaction> {
    debug!("resolving {} cell dep infos", cell_deps.len());
    add_cell_dep_infos(signer.client(), &mut tx, &cell_deps.items).await?;

    if cobuild {
        info!("binding {} actions through cobuild witness", actions.len());
        witness::pack_cobuild(&mut tx, actions)?;
        Ok(tx)
    } else {
        debug!("no cobuild proof required, {} actions dropped", actions.len());
        signer.prepare_transaction(tx).await
    }
}
