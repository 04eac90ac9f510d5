use docket_store::StoreError;
use thiserror::Error;

/// Errors from snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stream does not start with the snapshot magic tag.
    #[error("invalid snapshot magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: String, actual: String },

    /// The snapshot was written from a store of a different payload type.
    #[error("mismatched document type: snapshot holds {actual:?}, store expects {expected:?}")]
    MismatchedDocType { expected: String, actual: String },

    /// The header record failed to encode or decode.
    #[error("snapshot header: {0}")]
    Header(String),

    /// A document record failed to encode or decode. `index` counts the
    /// records successfully processed before the failure.
    #[error("document record {index}: {reason}")]
    Record { index: usize, reason: String },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the store being snapshotted or restored.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
