//! On-chain payloads of Spore and Cluster cells.

use ckb_types::{packed, prelude::*};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash;
use crate::schema::spore as mol;
use crate::types::{hex, Byte32};

/// Content of a Spore cell.
///
/// Molecule: `table SporeData { content_type: Bytes, content: Bytes, cluster_id: BytesOpt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SporeData {
    pub content_type: String,
    #[serde(with = "hex::bytes")]
    pub content: Vec<u8>,
    #[serde(default)]
    pub cluster_id: Option<Byte32>,
}

impl SporeData {
    pub fn new(content_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            content: content.into(),
            cluster_id: None,
        }
    }

    /// Attach the spore to a cluster.
    pub fn in_cluster(mut self, cluster_id: Byte32) -> Self {
        self.cluster_id = Some(cluster_id);
        self
    }

    /// Cell data bytes.
    pub fn pack(&self) -> Vec<u8> {
        let cluster_id = packed::BytesOpt::new_builder()
            .set(self.cluster_id.map(|id| id.0.as_slice().pack()))
            .build();
        mol::SporeData::new_builder()
            .content_type(self.content_type.as_bytes().pack())
            .content(self.content.as_slice().pack())
            .cluster_id(cluster_id)
            .build()
            .as_slice()
            .to_vec()
    }

    pub fn decode(slice: &[u8]) -> Result<Self> {
        let data = mol::SporeData::from_slice(slice)?;
        let cluster_id = data
            .cluster_id()
            .to_opt()
            .map(|id| Byte32::from_slice(&id.raw_data()))
            .transpose()?;
        Ok(Self {
            content_type: String::from_utf8_lossy(&data.content_type().raw_data()).into_owned(),
            content: data.content().raw_data().to_vec(),
            cluster_id,
        })
    }

    /// Content hash carried by a CreateSpore action.
    pub fn hash(&self) -> Byte32 {
        hash::blake2b_256(&self.pack())
    }
}

/// Content of a Cluster cell.
///
/// Molecule: `table ClusterData { name: Bytes, description: Bytes }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterData {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ClusterData {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        mol::ClusterData::new_builder()
            .name(self.name.as_bytes().pack())
            .description(self.description.as_bytes().pack())
            .build()
            .as_slice()
            .to_vec()
    }

    pub fn decode(slice: &[u8]) -> Result<Self> {
        let data = mol::ClusterData::from_slice(slice)?;
        Ok(Self {
            name: String::from_utf8_lossy(&data.name().raw_data()).into_owned(),
            description: String::from_utf8_lossy(&data.description().raw_data()).into_owned(),
        })
    }

    pub fn hash(&self) -> Byte32 {
        hash::blake2b_256(&self.pack())
    }
}
