//! Cells, out points, inputs and cell deps.

use ckb_types::{packed, prelude::*};
use serde::{Deserialize, Serialize};

use super::script::{Byte32, Script};
use super::SHANNONS_PER_BYTE;

/// Reference to a cell produced by an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub tx_hash: Byte32,
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx_hash: Byte32, index: u32) -> Self {
        Self { tx_hash, index }
    }

    pub fn pack(&self) -> packed::OutPoint {
        packed::OutPoint::new_builder()
            .tx_hash(self.tx_hash.pack())
            .index(self.index.pack())
            .build()
    }
}

/// A transaction input as committed on chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellInput {
    pub previous_output: OutPoint,
    pub since: u64,
}

impl CellInput {
    pub fn pack(&self) -> packed::CellInput {
        packed::CellInput::new_builder()
            .since(self.since.pack())
            .previous_output(self.previous_output.pack())
            .build()
    }
}

/// Capacity, ownership and optional type of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellOutput {
    pub capacity: u64,
    pub lock: Script,
    #[serde(rename = "type", default)]
    pub type_: Option<Script>,
}

impl CellOutput {
    /// An output whose capacity is exactly what it occupies with `data`.
    pub fn occupied(lock: Script, type_: Option<Script>, data: &[u8]) -> Self {
        let mut output = Self {
            capacity: 0,
            lock,
            type_,
        };
        output.capacity = output.occupied_capacity(data.len());
        output
    }

    /// Minimal capacity in shannons for this output carrying `data_len` bytes.
    pub fn occupied_capacity(&self, data_len: usize) -> u64 {
        let type_bytes = self.type_.as_ref().map_or(0, Script::occupied_bytes);
        (8 + self.lock.occupied_bytes() + type_bytes + data_len as u64) * SHANNONS_PER_BYTE
    }

    /// Same type and capacity under a new lock, topped up if the new lock
    /// needs more room than the old capacity covers.
    pub fn with_lock(&self, lock: Script, data_len: usize) -> Self {
        let mut output = Self {
            capacity: self.capacity,
            lock,
            type_: self.type_.clone(),
        };
        output.capacity = output.capacity.max(output.occupied_capacity(data_len));
        output
    }

    pub fn pack(&self) -> packed::CellOutput {
        let type_ = packed::ScriptOpt::new_builder()
            .set(self.type_.as_ref().map(Script::pack))
            .build();
        packed::CellOutput::new_builder()
            .capacity(self.capacity.pack())
            .lock(self.lock.pack())
            .type_(type_)
            .build()
    }
}

/// A live cell: where it lives, what it is, and its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub out_point: OutPoint,
    pub output: CellOutput,
    #[serde(with = "super::hex::bytes", default)]
    pub data: Vec<u8>,
}

impl Cell {
    /// A cell with no type script, usable for capacity or as a lock proxy.
    pub fn is_spare(&self) -> bool {
        self.output.type_.is_none()
    }
}

/// How a cell dep is loaded by the script runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    Code,
    DepGroup,
}

impl DepType {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Code => 0,
            Self::DepGroup => 1,
        }
    }
}

/// Code or state a script needs at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDep {
    pub out_point: OutPoint,
    pub dep_type: DepType,
}

impl CellDep {
    pub fn code(out_point: OutPoint) -> Self {
        Self {
            out_point,
            dep_type: DepType::Code,
        }
    }

    pub fn pack(&self) -> packed::CellDep {
        packed::CellDep::new_builder()
            .out_point(self.out_point.pack())
            .dep_type(packed::Byte::new(self.dep_type.as_byte()))
            .build()
    }
}

/// A cell dep as configured for a script deployment.
///
/// When `type_script` is set the code is deployed behind a type id and may
/// be upgraded, so the out point is looked up through the client at
/// assembly time and `cell_dep.out_point` is only a fallback hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDepInfo {
    pub cell_dep: CellDep,
    #[serde(default)]
    pub type_script: Option<Script>,
}

impl CellDepInfo {
    pub fn fixed(cell_dep: CellDep) -> Self {
        Self {
            cell_dep,
            type_script: None,
        }
    }

    /// Canonical bytes used as the dedup key.
    pub fn key(&self) -> Vec<u8> {
        let mut key = self.cell_dep.pack().as_slice().to_vec();
        if let Some(script) = &self.type_script {
            key.extend_from_slice(script.pack().as_slice());
        }
        key
    }
}
