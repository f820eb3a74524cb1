//! Chain primitives: hashes, scripts, cells and the transaction skeleton.
//!
//! These are the JSON-facing views of the skeleton. Each converts to its
//! `ckb_types::packed` counterpart through `pack()`, and script hashes and
//! identifiers are computed over those encodings.

pub mod cell;
pub mod hex;
pub mod script;
pub mod transaction;

pub use cell::{Cell, CellDep, CellDepInfo, CellInput, CellOutput, DepType, OutPoint};
pub use script::{Byte32, Script, ScriptHashType};
pub use transaction::{Input, Transaction};

/// Shannons per CKByte.
pub const SHANNONS_PER_BYTE: u64 = 100_000_000;
