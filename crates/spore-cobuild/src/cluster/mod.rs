//! Clusters: creation, transfer and resolution of cluster references.
//!
//! A spore that names a cluster is only valid if the transaction proves
//! control of that cluster. [`resolve_cluster`] does this in one of the
//! [`ClusterMode`] ways; [`create_clusters`] and [`transfer_clusters`]
//! manage cluster cells themselves.

pub mod engine;
pub mod resolve;
pub mod types;

pub use engine::{create_clusters, transfer_clusters};
pub use resolve::{resolve_cluster, ClusterMode};
pub use types::{ClusterSpec, ClusterTransfer};
