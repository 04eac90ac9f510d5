use docket_types::DocId;
use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The empty "unassigned" sentinel was supplied where a valid id is
    /// required.
    #[error("empty document id")]
    EmptyDocId,

    /// The requested document is not in the store.
    #[error("document not found: {0}")]
    NotFound(DocId),

    /// A document payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
