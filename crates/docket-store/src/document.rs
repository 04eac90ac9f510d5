use chrono::{DateTime, Utc};
use docket_types::DocId;
use serde::{Deserialize, Serialize};

/// A stored record: id, creation/update timestamps, and a typed payload.
///
/// Timestamps are managed by the store on write: `created_at` is set once
/// at first insertion and preserved on every later write to the same id;
/// `updated_at` is refreshed on every successful write and never moves
/// backwards. Values supplied by the caller on [`Store::put`] are
/// overwritten.
///
/// [`Store::put`]: crate::Store::put
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    /// Unique key of this document within its store.
    pub id: DocId,
    /// Wall-clock time of the first insertion.
    pub created_at: DateTime<Utc>,
    /// Wall-clock time of the most recent write.
    pub updated_at: DateTime<Utc>,
    /// The typed payload.
    pub data: T,
}

impl<T> Document<T> {
    /// Create a document with the given id and payload.
    ///
    /// Both timestamps are initialized to the current time; the store
    /// reassigns them on write.
    pub fn new(id: impl Into<DocId>, data: T) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            data,
        }
    }
}
