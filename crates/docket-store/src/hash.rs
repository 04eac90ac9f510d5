use serde::Serialize;

use docket_types::DocId;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// The `(id, data)` projection of a document that participates in the
/// content hash. Timestamps are deliberately absent.
#[derive(Serialize)]
struct HashRecord<'a, T> {
    id: &'a DocId,
    data: &'a T,
}

/// Order-independent content checksum over a set of documents.
///
/// Documents are fixed into a canonical order (ascending by id), each
/// `(id, data)` pair is serialized to canonical JSON bytes, and the bytes
/// are fed sequentially into a streaming CRC32. Equal `(id, data)` sets
/// hash equal regardless of iteration order; timestamps never participate.
///
/// The snapshot codec uses this to hash the exact document set it encodes.
pub fn hash_documents<'a, T, I>(documents: I) -> StoreResult<i32>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a Document<T>>,
{
    let mut docs: Vec<&Document<T>> = documents.into_iter().collect();
    docs.sort_by(|a, b| a.id.cmp(&b.id));

    let mut hasher = crc32fast::Hasher::new();
    for doc in docs {
        let record = HashRecord {
            id: &doc.id,
            data: &doc.data,
        };
        let bytes = serde_json::to_vec(&record)
            .map_err(|e| StoreError::Serialization(format!("document {}: {e}", doc.id)))?;
        hasher.update(&bytes);
    }

    Ok(hasher.finalize() as i32)
}

impl<T: Serialize> Store<T> {
    /// Order-independent content checksum over the store's `(id, data)`
    /// pairs. See [`hash_documents`].
    pub fn hash(&self) -> StoreResult<i32> {
        let map = self.documents.read().expect("lock poisoned");
        hash_documents(map.values())
    }
}
