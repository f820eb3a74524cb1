//! Cluster request types.

use serde::{Deserialize, Serialize};

use crate::data::ClusterData;
use crate::types::{Byte32, Script};

/// A cluster to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub data: ClusterData,
    /// Owner of the new cluster; the signer's recommended lock when `None`.
    #[serde(default)]
    pub to: Option<Script>,
}

/// A cluster to hand over to a new owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterTransfer {
    pub id: Byte32,
    pub to: Script,
}
