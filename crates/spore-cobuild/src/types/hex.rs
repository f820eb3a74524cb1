//! `0x`-prefixed hex helpers and serde adapters for byte fields.

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}

/// Decode a hex string, with or without the `0x` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>, ::hex::FromHexError> {
    ::hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

/// Serde adapter for a single `Vec<u8>` field.
pub mod bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::decode(&s).map_err(D::Error::custom)
    }
}

/// Serde adapter for a `Vec<Vec<u8>>` field.
pub mod bytes_vec {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(|b| super::encode(b)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        items
            .iter()
            .map(|s| super::decode(s).map_err(D::Error::custom))
            .collect()
    }
}
