//! In-memory chain state.
//!
//! [`MemoryChain`] holds a fixed set of live cells and answers [`Client`]
//! queries against it; [`MemorySigner`] is an account on top of it. Used
//! for offline assembly (the CLI loads a JSON snapshot) and in tests.
//!
//! Snapshot file format:
//! ```json
//! {
//!     "lock": { ... Script ... },
//!     "cells": [ { ... Cell ... } ]
//! }
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{Client, Signer};
use crate::error::{Result, SporeError};
use crate::types::{Cell, Script, Transaction};

/// A fixed live-cell set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryChain {
    cells: Vec<Cell>,
}

impl MemoryChain {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn insert(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[async_trait]
impl Client for MemoryChain {
    async fn find_singleton_cell_by_type(&self, type_script: &Script) -> Result<Option<Cell>> {
        Ok(self
            .cells
            .iter()
            .find(|cell| cell.output.type_.as_ref() == Some(type_script))
            .cloned())
    }

    async fn find_cells_by_lock(&self, lock: &Script) -> Result<Vec<Cell>> {
        Ok(self
            .cells
            .iter()
            .filter(|cell| &cell.output.lock == lock)
            .cloned()
            .collect())
    }
}

/// On-disk form of a [`MemorySigner`].
#[derive(Debug, Serialize, Deserialize)]
struct SignerSnapshot {
    lock: Script,
    #[serde(default)]
    cells: Vec<Cell>,
}

/// An account owning the cells under `lock` in a [`MemoryChain`].
///
/// `prepare_transaction` returns the skeleton unchanged and counts calls,
/// so callers can observe whether the generic preparation path ran.
#[derive(Debug)]
pub struct MemorySigner {
    chain: MemoryChain,
    lock: Script,
    prepared: AtomicUsize,
}

impl MemorySigner {
    pub fn new(chain: MemoryChain, lock: Script) -> Self {
        Self {
            chain,
            lock,
            prepared: AtomicUsize::new(0),
        }
    }

    /// Load a signer snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SporeError::Io` if the file cannot be read, or
    /// `SporeError::SerializationError` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let snapshot: SignerSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            SporeError::SerializationError(format!(
                "failed to parse snapshot {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(Self::new(MemoryChain::new(snapshot.cells), snapshot.lock))
    }

    pub fn lock(&self) -> &Script {
        &self.lock
    }

    /// How many times `prepare_transaction` has run.
    pub fn prepared_count(&self) -> usize {
        self.prepared.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Signer for MemorySigner {
    type Client = MemoryChain;

    fn client(&self) -> &MemoryChain {
        &self.chain
    }

    async fn recommended_lock(&self) -> Result<Script> {
        Ok(self.lock.clone())
    }

    async fn find_cells(&self) -> Result<Vec<Cell>> {
        self.chain.find_cells_by_lock(&self.lock).await
    }

    async fn prepare_transaction(&self, tx: Transaction) -> Result<Transaction> {
        self.prepared.fetch_add(1, Ordering::SeqCst);
        Ok(tx)
    }
}
