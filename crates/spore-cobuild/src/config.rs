//! Protocol configuration: script deployments and the cobuild scheme.
//!
//! A [`ProtocolConfig`] is loaded once at startup and passed by reference
//! into every lifecycle operation. It names each deployed version of the
//! Spore and Cluster scripts, the cell deps they need, and whether that
//! version requires a cobuild action proof.
//!
//! ```json
//! {
//!     "script_info_hash": "0x00…00",
//!     "spore":   [{ "version": "v2", "code_hash": "0x…", "hash_type": "data1",
//!                   "cell_deps": [...], "cobuild": true }],
//!     "cluster": [{ "version": "v2", ... }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SporeError};
use crate::types::{Byte32, CellDepInfo, Script, ScriptHashType};

/// One deployed version of an entity script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    /// Version label, unique per entity kind (e.g. `"v1"`, `"v2"`).
    pub version: String,
    pub code_hash: Byte32,
    pub hash_type: ScriptHashType,
    #[serde(default)]
    pub cell_deps: Vec<CellDepInfo>,
    /// Whether transactions touching this version must carry a cobuild witness.
    #[serde(default)]
    pub cobuild: bool,
}

impl ScriptInfo {
    /// Type script of the entity with identifier `id` under this version.
    pub fn type_script(&self, id: &Byte32) -> Script {
        Script::new(self.code_hash, self.hash_type, id.0.to_vec())
    }
}

/// Resolved protocol configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Identifies the cobuild scheme version; copied into every action.
    #[serde(default)]
    pub script_info_hash: Byte32,
    /// Spore script versions, oldest first.
    pub spore: Vec<ScriptInfo>,
    /// Cluster script versions, oldest first.
    pub cluster: Vec<ScriptInfo>,
}

impl ProtocolConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SporeError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `SporeError::Io` if the file cannot be read, or
    /// `SporeError::InvalidConfig` if it does not parse or validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that both script lists are non-empty with unique version labels.
    pub fn validate(&self) -> Result<()> {
        for (kind, scripts) in [("spore", &self.spore), ("cluster", &self.cluster)] {
            if scripts.is_empty() {
                return Err(SporeError::InvalidConfig(format!(
                    "no {kind} script versions configured"
                )));
            }
            let mut seen = HashSet::new();
            for info in scripts {
                if !seen.insert(info.version.as_str()) {
                    return Err(SporeError::InvalidConfig(format!(
                        "duplicate {kind} version {}",
                        info.version
                    )));
                }
            }
        }
        Ok(())
    }

    /// Spore script for `version`, or the latest when `None`.
    pub fn spore_script(&self, version: Option<&str>) -> Result<&ScriptInfo> {
        select("spore", &self.spore, version)
    }

    /// Cluster script for `version`, or the latest when `None`.
    pub fn cluster_script(&self, version: Option<&str>) -> Result<&ScriptInfo> {
        select("cluster", &self.cluster, version)
    }
}

fn select<'a>(
    kind: &'static str,
    scripts: &'a [ScriptInfo],
    version: Option<&str>,
) -> Result<&'a ScriptInfo> {
    let found = match version {
        Some(v) => scripts.iter().find(|info| info.version == v),
        None => scripts.last(),
    };
    found.ok_or_else(|| SporeError::UnknownScriptVersion {
        kind,
        version: version.unwrap_or("latest").to_string(),
    })
}
