//! Spore request types.

use serde::{Deserialize, Serialize};

use crate::data::SporeData;
use crate::types::{Byte32, Script};

/// A spore to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SporeSpec {
    pub data: SporeData,
    /// Owner of the new spore; the signer's recommended lock when `None`.
    #[serde(default)]
    pub to: Option<Script>,
}

/// A spore to hand over to a new owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SporeTransfer {
    pub id: Byte32,
    pub to: Script,
}
