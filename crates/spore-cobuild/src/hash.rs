//! Blake2b-256 hashing with the chain's `ckb-default-hash` personalization.

use crate::types::Byte32;

/// Hash a single byte string.
pub fn blake2b_256(data: &[u8]) -> Byte32 {
    Byte32(ckb_hash::blake2b_256(data))
}

/// Incremental hasher for digests over several encoded parts.
pub struct Hasher {
    inner: ckb_hash::Blake2b,
}

impl Hasher {
    pub fn new() -> Self {
        Self {
            inner: ckb_hash::new_blake2b(),
        }
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    pub fn finalize(self) -> Byte32 {
        let mut out = [0u8; 32];
        self.inner.finalize(&mut out);
        Byte32(out)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}
