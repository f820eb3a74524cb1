//! The transaction skeleton being assembled.

use ckb_types::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellDep, CellInput, CellOutput, OutPoint};
use super::script::{Byte32, Script};

/// A consumed cell, kept resolved so locks and types can be inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub since: u64,
    pub cell: Cell,
}

impl Input {
    pub fn cell_input(&self) -> CellInput {
        CellInput {
            previous_output: self.cell.out_point.clone(),
            since: self.since,
        }
    }
}

/// A transaction under construction.
///
/// Every mutation is an append; nothing already present is reordered or
/// dropped, so a skeleton stays well-formed after a failed operation.
/// Cell deps behave as a set keyed by their molecule encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub cell_deps: Vec<CellDep>,
    #[serde(default)]
    pub header_deps: Vec<Byte32>,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<CellOutput>,
    #[serde(with = "super::hex::bytes_vec", default)]
    pub outputs_data: Vec<Vec<u8>>,
    #[serde(with = "super::hex::bytes_vec", default)]
    pub witnesses: Vec<Vec<u8>>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a live cell. Returns the input index.
    pub fn add_input(&mut self, cell: Cell) -> usize {
        debug!(
            "input #{} <- {}:{}",
            self.inputs.len(),
            cell.out_point.tx_hash,
            cell.out_point.index
        );
        self.inputs.push(Input { since: 0, cell });
        self.inputs.len() - 1
    }

    /// Produce a cell. Returns the output index.
    pub fn add_output(&mut self, output: CellOutput, data: Vec<u8>) -> usize {
        debug!(
            "output #{} -> capacity {} lock {}",
            self.outputs.len(),
            output.capacity,
            output.lock.hash()
        );
        self.outputs.push(output);
        self.outputs_data.push(data);
        self.outputs.len() - 1
    }

    /// Register a cell dep unless an identical one is already present.
    /// Returns whether it was added.
    pub fn add_cell_dep(&mut self, cell_dep: CellDep) -> bool {
        let key = cell_dep.pack();
        if self
            .cell_deps
            .iter()
            .any(|dep| dep.pack().as_slice() == key.as_slice())
        {
            return false;
        }
        debug!(
            "cell dep <- {}:{}",
            cell_dep.out_point.tx_hash, cell_dep.out_point.index
        );
        self.cell_deps.push(cell_dep);
        true
    }

    /// The committed form of every input, in order.
    pub fn cell_inputs(&self) -> impl Iterator<Item = CellInput> + '_ {
        self.inputs.iter().map(Input::cell_input)
    }

    pub fn find_input_index_by_lock(&self, lock: &Script) -> Option<usize> {
        self.inputs.iter().position(|input| &input.cell.output.lock == lock)
    }

    pub fn find_output_index_by_lock(&self, lock: &Script) -> Option<usize> {
        self.outputs.iter().position(|output| &output.lock == lock)
    }

    /// Whether the cell at `out_point` is already consumed.
    pub fn has_input(&self, out_point: &OutPoint) -> bool {
        self.inputs
            .iter()
            .any(|input| &input.cell.out_point == out_point)
    }
}
