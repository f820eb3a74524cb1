//! Deterministic entity identifiers.
//!
//! An identifier is `blake2b_256(CellInputVec(inputs) || output_index as u64 LE)`,
//! taken over the skeleton's inputs at the moment the entity output is about
//! to be appended. Inputs are never replayed on chain, so identifiers do not
//! collide. Adding inputs afterwards changes what the identifier would be;
//! callers derive identifiers once the input set is final.
//!
//! This is not the chain's built-in type-id rule, which hashes only the
//! first input. Identifiers here cover the whole counted input vector, so
//! the two differ for any skeleton with more than one input.

use ckb_types::{packed, prelude::*};

use crate::error::{Result, SporeError};
use crate::hash::Hasher;
use crate::types::{Byte32, Transaction};

/// Identifier for an entity that will occupy `output_index`.
pub fn derive_type_id(tx: &Transaction, output_index: usize) -> Result<Byte32> {
    if tx.inputs.is_empty() {
        return Err(SporeError::NoInputs);
    }
    let inputs = packed::CellInputVec::new_builder()
        .set(tx.cell_inputs().map(|input| input.pack()).collect())
        .build();

    let mut hasher = Hasher::new();
    hasher
        .update(inputs.as_slice())
        .update(&(output_index as u64).to_le_bytes());
    Ok(hasher.finalize())
}

/// Identifiers for the next `count` outputs to be appended.
pub fn derive_type_ids(tx: &Transaction, count: usize) -> Result<Vec<Byte32>> {
    let start = tx.outputs.len();
    (start..start + count)
        .map(|index| derive_type_id(tx, index))
        .collect()
}
