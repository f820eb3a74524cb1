//! Error types for Spore Cobuild.
//!
//! Every failure aborts the operation in progress and is returned to the
//! caller unchanged. Nothing is retried here.

use molecule::error::VerificationError;

use crate::types::Byte32;

/// Broad classification of a [`SporeError`], for callers that react
/// differently to misuse, missing chain state and collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller misuse: bad configuration or malformed input cells.
    Configuration,
    /// Something the transaction needs is not live on chain.
    Resolution,
    /// Malformed molecule bytes or an unexpected witness layout.
    Codec,
    /// Failure reported by a client or signer, or by the filesystem.
    External,
}

/// Spore error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum SporeError {
    #[error("cell must have a type script")]
    MissingTypeScript,

    #[error("type script args must hold a 32-byte identifier, got {0} bytes")]
    InvalidTypeArgs(usize),

    #[error("type script changed across transition: {before} -> {after}")]
    TypeMismatch { before: Byte32, after: Byte32 },

    #[error("clusterMode is undefined but the entity declares cluster {0}")]
    ClusterModeRequired(Byte32),

    #[error("unknown {kind} script version: {version}")]
    UnknownScriptVersion { kind: &'static str, version: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0} is listed more than once in one call")]
    DuplicateEntity(Byte32),

    #[error("transaction has no inputs to derive an identifier from")]
    NoInputs,

    #[error("no spare cell available to fund the transaction")]
    NoFundingCell,

    #[error("spore not found for id {0}")]
    SporeNotFound(Byte32),

    #[error("cluster cell not found for id {0}")]
    ClusterNotFound(Byte32),

    #[error("lock proxy cell not found for cluster {0}")]
    LockProxyNotFound(Byte32),

    #[error("cell dep not found for type script {0}")]
    CellDepNotFound(Byte32),

    #[error("witness {0} already carries a cobuild layout other than SighashAll")]
    ConflictingCobuildWitness(usize),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SporeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTypeScript
            | Self::InvalidTypeArgs(_)
            | Self::TypeMismatch { .. }
            | Self::ClusterModeRequired(_)
            | Self::UnknownScriptVersion { .. }
            | Self::InvalidConfig(_)
            | Self::DuplicateEntity(_)
            | Self::NoInputs => ErrorKind::Configuration,
            Self::NoFundingCell
            | Self::SporeNotFound(_)
            | Self::ClusterNotFound(_)
            | Self::LockProxyNotFound(_)
            | Self::CellDepNotFound(_) => ErrorKind::Resolution,
            Self::ConflictingCobuildWitness(_) | Self::Decode(_) => ErrorKind::Codec,
            Self::Backend(_) | Self::SerializationError(_) | Self::Io(_) => ErrorKind::External,
        }
    }
}

impl From<VerificationError> for SporeError {
    fn from(e: VerificationError) -> Self {
        SporeError::Decode(e.to_string())
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, SporeError>;
