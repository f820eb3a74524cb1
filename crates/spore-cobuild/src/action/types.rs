//! Action records and their molecule encoding.

use ckb_types::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SporeError};
use crate::schema::{cobuild, spore as mol};
use crate::types::{hex, Byte32, Script};

/// Owner of an entity before or after a transition.
///
/// Molecule: `union Address { Script }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Address {
    Script(Script),
}

impl Address {
    pub fn pack(&self) -> mol::Address {
        match self {
            Self::Script(script) => script.pack().into(),
        }
    }
}

impl TryFrom<mol::Address> for Address {
    type Error = SporeError;

    fn try_from(value: mol::Address) -> Result<Self> {
        match value.to_enum() {
            mol::AddressUnion::Script(script) => Ok(Self::Script(script.try_into()?)),
        }
    }
}

impl From<Script> for Address {
    fn from(script: Script) -> Self {
        Self::Script(script)
    }
}

/// A Spore protocol state transition.
///
/// Molecule: `union SporeAction { CreateSpore, TransferSpore, MeltSpore,
/// CreateCluster, TransferCluster }`, each variant a table of the fields
/// below in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SporeAction {
    CreateSpore {
        spore_id: Byte32,
        to: Address,
        data_hash: Byte32,
    },
    TransferSpore {
        spore_id: Byte32,
        from: Address,
        to: Address,
    },
    MeltSpore {
        spore_id: Byte32,
        from: Address,
    },
    CreateCluster {
        cluster_id: Byte32,
        to: Address,
        data_hash: Byte32,
    },
    TransferCluster {
        cluster_id: Byte32,
        from: Address,
        to: Address,
    },
}

impl SporeAction {
    /// Union item id of this variant.
    pub fn item_id(&self) -> u32 {
        match self {
            Self::CreateSpore { .. } => 0,
            Self::TransferSpore { .. } => 1,
            Self::MeltSpore { .. } => 2,
            Self::CreateCluster { .. } => 3,
            Self::TransferCluster { .. } => 4,
        }
    }

    /// Identifier of the entity this action describes.
    pub fn entity_id(&self) -> Byte32 {
        match self {
            Self::CreateSpore { spore_id, .. }
            | Self::TransferSpore { spore_id, .. }
            | Self::MeltSpore { spore_id, .. } => *spore_id,
            Self::CreateCluster { cluster_id, .. } | Self::TransferCluster { cluster_id, .. } => {
                *cluster_id
            }
        }
    }

    pub fn pack(&self) -> mol::SporeAction {
        match self {
            Self::CreateSpore {
                spore_id,
                to,
                data_hash,
            } => mol::CreateSpore::new_builder()
                .spore_id(spore_id.pack())
                .to(to.pack())
                .data_hash(data_hash.pack())
                .build()
                .into(),
            Self::TransferSpore { spore_id, from, to } => mol::TransferSpore::new_builder()
                .spore_id(spore_id.pack())
                .from(from.pack())
                .to(to.pack())
                .build()
                .into(),
            Self::MeltSpore { spore_id, from } => mol::MeltSpore::new_builder()
                .spore_id(spore_id.pack())
                .from(from.pack())
                .build()
                .into(),
            Self::CreateCluster {
                cluster_id,
                to,
                data_hash,
            } => mol::CreateCluster::new_builder()
                .cluster_id(cluster_id.pack())
                .to(to.pack())
                .data_hash(data_hash.pack())
                .build()
                .into(),
            Self::TransferCluster {
                cluster_id,
                from,
                to,
            } => mol::TransferCluster::new_builder()
                .cluster_id(cluster_id.pack())
                .from(from.pack())
                .to(to.pack())
                .build()
                .into(),
        }
    }

    /// Decode a packed `SporeAction` union.
    pub fn decode(slice: &[u8]) -> Result<Self> {
        mol::SporeAction::from_slice(slice)?.try_into()
    }
}

impl TryFrom<mol::SporeAction> for SporeAction {
    type Error = SporeError;

    fn try_from(value: mol::SporeAction) -> Result<Self> {
        let action = match value.to_enum() {
            mol::SporeActionUnion::CreateSpore(item) => Self::CreateSpore {
                spore_id: item.spore_id().into(),
                to: item.to().try_into()?,
                data_hash: item.data_hash().into(),
            },
            mol::SporeActionUnion::TransferSpore(item) => Self::TransferSpore {
                spore_id: item.spore_id().into(),
                from: item.from().try_into()?,
                to: item.to().try_into()?,
            },
            mol::SporeActionUnion::MeltSpore(item) => Self::MeltSpore {
                spore_id: item.spore_id().into(),
                from: item.from().try_into()?,
            },
            mol::SporeActionUnion::CreateCluster(item) => Self::CreateCluster {
                cluster_id: item.cluster_id().into(),
                to: item.to().try_into()?,
                data_hash: item.data_hash().into(),
            },
            mol::SporeActionUnion::TransferCluster(item) => Self::TransferCluster {
                cluster_id: item.cluster_id().into(),
                from: item.from().try_into()?,
                to: item.to().try_into()?,
            },
        };
        Ok(action)
    }
}

/// One cobuild action: which script it is addressed to, under which scheme,
/// and the packed [`SporeAction`] payload.
///
/// Molecule: `table Action { script_info_hash: Byte32, script_hash: Byte32, data: Bytes }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub script_info_hash: Byte32,
    pub script_hash: Byte32,
    #[serde(with = "hex::bytes")]
    pub data: Vec<u8>,
}

impl Action {
    pub fn new(script_info_hash: Byte32, script_hash: Byte32, action: &SporeAction) -> Self {
        Self {
            script_info_hash,
            script_hash,
            data: action.pack().as_slice().to_vec(),
        }
    }

    pub fn pack(&self) -> cobuild::Action {
        cobuild::Action::new_builder()
            .script_info_hash(self.script_info_hash.pack())
            .script_hash(self.script_hash.pack())
            .data(self.data.as_slice().pack())
            .build()
    }

    pub fn decode(slice: &[u8]) -> Result<Self> {
        Ok(cobuild::Action::from_slice(slice)?.into())
    }

    /// Decode the payload.
    pub fn spore_action(&self) -> Result<SporeAction> {
        SporeAction::decode(&self.data)
    }
}

impl From<cobuild::Action> for Action {
    fn from(value: cobuild::Action) -> Self {
        Self {
            script_info_hash: value.script_info_hash().into(),
            script_hash: value.script_hash().into(),
            data: value.data().raw_data().to_vec(),
        }
    }
}
