//! Spore Cobuild: transaction assembly for the Spore and Cluster protocol.
//!
//! Derives deterministic entity identifiers, builds the inputs and outputs
//! of create, transfer and melt transitions, resolves cluster references,
//! and binds the resulting actions to the transaction through a cobuild
//! witness.

pub mod action;
pub mod client;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod hash;
pub mod id;
pub mod lifecycle;
pub mod memory;
pub mod schema;
pub mod spore;
pub mod types;
pub mod witness;

// Re-export primary types
pub use action::{Action, Address, SporeAction};
pub use client::{Client, Signer};
pub use config::{ProtocolConfig, ScriptInfo};
pub use data::{ClusterData, SporeData};
pub use error::{ErrorKind, Result, SporeError};
pub use id::{derive_type_id, derive_type_ids};
pub use lifecycle::CreateOutcome;
pub use types::{Byte32, Cell, CellDep, CellDepInfo, CellOutput, OutPoint, Script, Transaction};
pub use witness::{pack_cobuild, WitnessLayout};

// Re-export lifecycle operations
pub use cluster::{
    create_clusters, resolve_cluster, transfer_clusters, ClusterMode, ClusterSpec, ClusterTransfer,
};
pub use spore::{create_spores, melt_spores, transfer_spores, SporeSpec, SporeTransfer};
