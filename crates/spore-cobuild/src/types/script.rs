//! Hashes and scripts.

use std::fmt;
use std::str::FromStr;

use ckb_types::{packed, prelude::*};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SporeError};

/// A 32-byte hash or identifier.
///
/// Displays and serializes as `0x`-prefixed hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Byte32(pub [u8; 32]);

impl Byte32 {
    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Build from a slice that must be exactly 32 bytes long.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| {
            SporeError::Decode(format!("expected 32 bytes, got {}", slice.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn pack(&self) -> packed::Byte32 {
        self.0.pack()
    }
}

impl From<packed::Byte32> for Byte32 {
    fn from(value: packed::Byte32) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(value.as_slice());
        Self(out)
    }
}

impl AsRef<[u8]> for Byte32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::hex::encode(&self.0))
    }
}

impl fmt::Debug for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte32({self})")
    }
}

impl FromStr for Byte32 {
    type Err = SporeError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = super::hex::decode(s)
            .map_err(|e| SporeError::Decode(format!("invalid hex {s:?}: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Byte32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Byte32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How a script's `code_hash` is matched against cell deps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptHashType {
    Data,
    Type,
    Data1,
    Data2,
}

impl ScriptHashType {
    /// Byte value used in the molecule encoding.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Data => 0,
            Self::Type => 1,
            Self::Data1 => 2,
            Self::Data2 => 4,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Self::Data),
            1 => Ok(Self::Type),
            2 => Ok(Self::Data1),
            4 => Ok(Self::Data2),
            other => Err(SporeError::Decode(format!("unknown hash type {other}"))),
        }
    }
}

/// A lock or type script.
///
/// JSON view of `packed::Script`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script {
    pub code_hash: Byte32,
    pub hash_type: ScriptHashType,
    #[serde(with = "super::hex::bytes")]
    pub args: Vec<u8>,
}

impl Script {
    pub fn new(code_hash: Byte32, hash_type: ScriptHashType, args: impl Into<Vec<u8>>) -> Self {
        Self {
            code_hash,
            hash_type,
            args: args.into(),
        }
    }

    pub fn pack(&self) -> packed::Script {
        packed::Script::new_builder()
            .code_hash(self.code_hash.pack())
            .hash_type(packed::Byte::new(self.hash_type.as_byte()))
            .args(self.args.as_slice().pack())
            .build()
    }

    /// Decode a molecule `Script`, rejecting any extra or missing fields.
    pub fn decode(slice: &[u8]) -> Result<Self> {
        packed::Script::from_slice(slice)?.try_into()
    }

    pub fn hash(&self) -> Byte32 {
        self.pack().calc_script_hash().into()
    }

    /// Bytes this script occupies in a cell.
    pub fn occupied_bytes(&self) -> u64 {
        32 + 1 + self.args.len() as u64
    }
}

impl TryFrom<packed::Script> for Script {
    type Error = SporeError;

    fn try_from(value: packed::Script) -> Result<Self> {
        Ok(Self {
            code_hash: value.code_hash().into(),
            hash_type: ScriptHashType::from_byte(value.hash_type().into())?,
            args: value.args().raw_data().to_vec(),
        })
    }
}
