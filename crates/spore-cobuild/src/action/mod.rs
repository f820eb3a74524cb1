//! Cobuild actions: structured records of entity state transitions.

pub mod assemble;
pub mod types;

pub use assemble::{create_cluster, create_spore, melt_spore, transfer_cluster, transfer_spore};
pub use types::{Action, Address, SporeAction};
