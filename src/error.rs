//! Error types for the `ragcore` crate.

use thiserror::Error;

/// The failure class reported by an embedding provider.
///
/// Providers must classify their failures so callers can tell a bad
/// credential from a flaky network from a rejected input, and decide
/// whether to surface, fix, or (at a higher layer) retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingErrorKind {
    /// The provider rejected the credentials. Retrying will not help.
    Authentication,
    /// The request did not complete (timeout, connection failure,
    /// rate limit, server error). Retrying may help.
    Network,
    /// The provider rejected the input itself.
    InvalidInput,
}

impl std::fmt::Display for EmbeddingErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Network => write!(f, "network"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration or argument validation error.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vector's width does not match the store's dimensionality.
    ///
    /// The operation that produced this error left the store unchanged.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the store holds.
        expected: usize,
        /// The width of the offending vector.
        actual: usize,
    },

    /// A zero-magnitude vector was passed to a similarity metric that
    /// cannot score it (cosine divides by the norms).
    #[error("zero-magnitude vector cannot be scored")]
    DegenerateVector,

    /// An embedding provider returned a different number of vectors than
    /// it was given texts. Providers must preserve order and cardinality;
    /// nothing is inserted when this is detected.
    #[error("embedding batch returned {actual} vectors for {expected} inputs")]
    BatchSizeMismatch {
        /// Number of texts sent to the provider.
        expected: usize,
        /// Number of vectors it returned.
        actual: usize,
    },

    /// An embedding provider failed.
    #[error("embedding error ({provider}, {kind}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// The failure class.
        kind: EmbeddingErrorKind,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
