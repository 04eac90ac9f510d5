use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use docket_types::DocId;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};

/// In-memory, `HashMap`-based document store bound to one payload type.
///
/// All documents are held in memory behind a single `RwLock`: readers
/// (`get`, `select`, `hash`, snapshot encoding) proceed concurrently,
/// writers (`put`, `delete`, `clear`, `load`) take exclusive access.
/// Documents are cloned on read.
pub struct Store<T> {
    pub(crate) documents: RwLock<HashMap<DocId, Document<T>>>,
}

impl<T> Store<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Insert or replace a document under its own id.
    ///
    /// The write is a whole-record replacement; there is no field merge.
    /// For an existing id the previous `created_at` is preserved and
    /// `updated_at` is advanced (never backwards). For a new id both
    /// timestamps are set to the current time.
    pub fn put(&self, mut doc: Document<T>) -> StoreResult<()> {
        if doc.id.is_empty() {
            return Err(StoreError::EmptyDocId);
        }

        let mut map = self.documents.write().expect("lock poisoned");
        let now = Utc::now();
        match map.get(&doc.id) {
            Some(existing) => {
                doc.created_at = existing.created_at;
                doc.updated_at = now.max(existing.updated_at);
            }
            None => {
                doc.created_at = now;
                doc.updated_at = now;
            }
        }
        map.insert(doc.id.clone(), doc);
        Ok(())
    }

    /// Remove a document by id.
    pub fn delete(&self, id: &DocId) -> StoreResult<()> {
        let mut map = self.documents.write().expect("lock poisoned");
        match map.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    /// Remove all documents. Always succeeds.
    pub fn clear(&self) {
        self.documents.write().expect("lock poisoned").clear();
    }

    /// Insert a document exactly as given, preserving its timestamps.
    ///
    /// This is the raw restore path used by the snapshot codec; unlike
    /// [`put`](Self::put) it performs no timestamp bookkeeping. The
    /// empty-id sentinel is still rejected.
    pub fn load(&self, doc: Document<T>) -> StoreResult<()> {
        if doc.id.is_empty() {
            return Err(StoreError::EmptyDocId);
        }
        let mut map = self.documents.write().expect("lock poisoned");
        map.insert(doc.id.clone(), doc);
        Ok(())
    }
}

impl<T: Clone> Store<T> {
    /// Retrieve a document by id.
    ///
    /// The returned value is a clone; mutating it does not affect stored
    /// state.
    pub fn get(&self, id: &DocId) -> StoreResult<Document<T>> {
        if id.is_empty() {
            return Err(StoreError::EmptyDocId);
        }
        let map = self.documents.read().expect("lock poisoned");
        map.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// A point-in-time clone of every document in the store.
    ///
    /// Order is unspecified and must not be relied upon. The clone is
    /// taken under a single read-lock acquisition, so it reflects one
    /// consistent instant even under concurrent writers.
    pub fn documents(&self) -> Vec<Document<T>> {
        let map = self.documents.read().expect("lock poisoned");
        map.values().cloned().collect()
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("document_count", &self.len())
            .finish()
    }
}
