use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed 4-character tag identifying a valid snapshot stream.
pub const SNAPSHOT_MAGIC: &str = "DKS1";

/// Stable descriptor of a store's payload type, embedded in the header
/// and checked on read.
pub fn doc_type<T>() -> &'static str {
    std::any::type_name::<T>()
}

/// Header record describing exactly one serialized store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Magic tag; must equal [`SNAPSHOT_MAGIC`].
    pub magic: String,
    /// Wall-clock time the snapshot was written.
    pub timestamp: DateTime<Utc>,
    /// Descriptor of the payload type the snapshot was written from.
    pub doc_type: String,
    /// Content hash of the encoded document set at write time.
    ///
    /// Informational metadata for external integrity audits; readers do
    /// not re-verify it against the parsed content.
    pub hash: i32,
}

impl SnapshotHeader {
    /// Build a header for a snapshot of payload type `T` with the given
    /// content hash, stamped with the current time.
    pub fn new<T>(hash: i32) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC.to_string(),
            timestamp: Utc::now(),
            doc_type: doc_type::<T>().to_string(),
            hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_is_four_characters() {
        assert_eq!(SNAPSHOT_MAGIC.len(), 4);
    }

    #[test]
    fn doc_type_distinguishes_payload_types() {
        assert_ne!(doc_type::<u32>(), doc_type::<String>());
        assert_eq!(doc_type::<u32>(), doc_type::<u32>());
    }

    #[test]
    fn header_serde_roundtrip() {
        let header = SnapshotHeader::new::<u32>(-42);
        let json = serde_json::to_string(&header).unwrap();
        let parsed: SnapshotHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.magic, SNAPSHOT_MAGIC);
        assert_eq!(parsed.doc_type, doc_type::<u32>());
        assert_eq!(parsed.hash, -42);
        assert_eq!(parsed.timestamp, header.timestamp);
    }
}
