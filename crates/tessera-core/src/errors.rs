//! Error taxonomy for tessera-core.
//!
//! Every fallible operation in the core returns [`TesseraResult`]. Errors are
//! raised synchronously to the immediate caller and never logged-and-continued
//! inside the core.
//!
//! A failed signature check is not an error: `verify` returns `Ok(false)`.

use thiserror::Error;

/// Result alias used across the crate.
pub type TesseraResult<T> = Result<T, TesseraError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TesseraError {
    /// Malformed or out-of-range caller input, detected before serialization.
    #[error("invalid {kind}.{field} = {value}: {reason}")]
    Validation {
        kind: String,
        field: String,
        value: String,
        reason: String,
    },

    /// The (kind, version) pair has no schema.
    #[error("unsupported {kind} version: {version}")]
    UnsupportedVariant { kind: String, version: u8 },

    /// A type discriminant outside the known set.
    #[error("Unknown tx type: {value}")]
    UnknownKind { value: String },

    /// Neither an explicit public key nor a usable seed was provided.
    #[error("Please provide either seed or senderPublicKey")]
    MissingKeyMaterial,

    /// A proof already occupies the requested index.
    #[error("Proof at index {index} already exists")]
    DuplicateProofIndex { index: usize },

    /// The requested index is outside the kind's proof limit.
    #[error("proof index {index} exceeds the limit of {limit} proofs")]
    ProofLimitExceeded { index: usize, limit: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl TesseraError {
    pub fn validation(
        kind: impl Into<String>,
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            kind: kind.into(),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_variant(kind: impl Into<String>, version: u8) -> Self {
        Self::UnsupportedVariant {
            kind: kind.into(),
            version,
        }
    }

    pub fn unknown_kind(value: impl ToString) -> Self {
        Self::UnknownKind {
            value: value.to_string(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Stable machine-readable code, used by the CLI in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::UnsupportedVariant { .. } => "unsupported_variant",
            Self::UnknownKind { .. } => "unknown_kind",
            Self::MissingKeyMaterial => "missing_key_material",
            Self::DuplicateProofIndex { .. } => "duplicate_proof_index",
            Self::ProofLimitExceeded { .. } => "proof_limit_exceeded",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Serialization(_) => "serialization",
            Self::Crypto(_) => "crypto",
            Self::Invariant(_) => "invariant",
        }
    }
}
