//! Archive container bundling multiple named Docket snapshots.
//!
//! An archive is a single compressed byte container holding zero or more
//! named snapshot streams, appended strictly in call order.
//!
//! # Container Format
//!
//! - **Header**: magic `DKA1` + format version.
//! - **Entries**: marker byte, name (varint length + UTF-8), modification
//!   timestamp, uncompressed/compressed sizes (varints), CRC32 of the
//!   compressed payload, zstd-compressed snapshot bytes.
//! - **Trailer**: end sentinel + BLAKE3 checksum of everything before it.
//!
//! [`ArchiveWriter`] builds containers from stores; [`ArchiveReader`]
//! retrieves a snapshot by name with a linear scan from the start (the
//! first matching entry wins; there is no random access).

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{ArchiveError, ArchiveResult};
pub use reader::{ArchiveEntry, ArchiveReader};
pub use writer::{ArchiveWriter, ARCHIVE_MAGIC, ARCHIVE_VERSION};

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use docket_store::{Document, Query, Store};
    use docket_types::DocId;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct TestDoc {
        name: String,
        age: u32,
    }

    fn make_store(people: &[(&str, &str, u32)]) -> Store<TestDoc> {
        let store = Store::new();
        for (id, name, age) in people {
            store
                .put(Document::new(
                    *id,
                    TestDoc {
                        name: name.to_string(),
                        age: *age,
                    },
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn roundtrip_single_entry() {
        let store = make_store(&[("1", "John Doe", 30), ("2", "Jane Smith", 25)]);

        let mut writer = ArchiveWriter::new();
        writer.append_store("test.store", &store).unwrap();
        assert_eq!(writer.len(), 1);

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let restored: Store<TestDoc> = reader.read_store("test.store").unwrap();

        assert_eq!(restored.hash().unwrap(), store.hash().unwrap());
        let original = store.select(&Query::new());
        let loaded = restored.select(&Query::new());
        assert_eq!(loaded.total, original.total);

        for doc in store.documents() {
            let restored_doc = restored.get(&doc.id).unwrap();
            assert_eq!(restored_doc, doc);
            assert_eq!(restored_doc.created_at, doc.created_at);
            assert_eq!(restored_doc.updated_at, doc.updated_at);
        }
    }

    #[test]
    fn lookup_returns_only_the_named_entry() {
        let store_a = make_store(&[("1", "alice", 30)]);
        let store_b = make_store(&[("2", "bob", 25), ("3", "carol", 35)]);

        let mut writer = ArchiveWriter::new();
        writer.append_store("a", &store_a).unwrap();
        writer.append_store("b", &store_b).unwrap();

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let restored: Store<TestDoc> = reader.read_store("b").unwrap();

        assert_eq!(restored.len(), 2);
        assert!(restored.get(&DocId::new("1")).is_err());
        assert!(restored.get(&DocId::new("2")).is_ok());
        assert!(restored.get(&DocId::new("3")).is_ok());
    }

    #[test]
    fn missing_entry_is_not_found() {
        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("some-other-file.store", &store).unwrap();

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let err = reader.read_store::<TestDoc>("non-existent-file.store").unwrap_err();
        assert!(
            matches!(err, ArchiveError::EntryNotFound(ref name) if name == "non-existent-file.store")
        );
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_entry() {
        let first = make_store(&[("1", "first", 1)]);
        let second = make_store(&[("2", "second", 2)]);

        let mut writer = ArchiveWriter::new();
        writer.append_store("dup", &first).unwrap();
        writer.append_store("dup", &second).unwrap();

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let restored: Store<TestDoc> = reader.read_store("dup").unwrap();
        assert!(restored.get(&DocId::new("1")).is_ok());
        assert!(restored.get(&DocId::new("2")).is_err());
    }

    #[test]
    fn empty_archive() {
        let writer = ArchiveWriter::new();
        assert!(writer.is_empty());

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        assert!(reader.entries().unwrap().is_empty());
        let err = reader.read_store::<TestDoc>("anything").unwrap_err();
        assert!(matches!(err, ArchiveError::EntryNotFound(_)));
    }

    #[test]
    fn entries_report_names_in_append_order() {
        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("a", &store).unwrap();
        writer.append_store("b", &store).unwrap();

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let entries = reader.entries().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(entries.iter().all(|e| e.size > 0));
        assert!(reader.contains("a"));
        assert!(!reader.contains("c"));
    }

    #[test]
    fn mismatched_payload_type_is_rejected() {
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        struct OtherDoc {
            value: f64,
        }

        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("a", &store).unwrap();

        let reader = ArchiveReader::from_bytes(writer.finish()).unwrap();
        let err = reader.read_store::<OtherDoc>("a").unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::Snapshot(docket_snapshot::SnapshotError::MismatchedDocType { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Corruption handling
    // -----------------------------------------------------------------------

    #[test]
    fn bad_magic() {
        let mut data = ArchiveWriter::new().finish();
        data[0..4].copy_from_slice(b"BADM");
        let err = ArchiveReader::from_bytes(data).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidMagic { .. }));
    }

    #[test]
    fn bad_version() {
        let mut data = ArchiveWriter::new().finish();
        data[4..8].copy_from_slice(&99u32.to_be_bytes());
        // Checksum no longer matters: the version check runs first.
        let err = ArchiveReader::from_bytes(data).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsupportedVersion(99)));
    }

    #[test]
    fn container_too_short() {
        let err = ArchiveReader::from_bytes(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ArchiveError::CorruptEntry { .. }));
    }

    #[test]
    fn tampered_container_fails_the_checksum() {
        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("a", &store).unwrap();
        let mut data = writer.finish();

        let mid = data.len() / 2;
        data[mid] ^= 0xFF;
        let err = ArchiveReader::from_bytes(data).unwrap_err();
        assert!(matches!(err, ArchiveError::ChecksumMismatch));
    }

    #[test]
    fn tampered_payload_fails_the_entry_crc() {
        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("a", &store).unwrap();
        let mut data = writer.finish();

        // Flip the final compressed payload byte (just before the end
        // sentinel), then rewrite the container checksum so only the
        // per-entry CRC can catch the damage.
        let body_end = data.len() - 32;
        data[body_end - 2] ^= 0xFF;
        let checksum = *blake3::hash(&data[..body_end]).as_bytes();
        data[body_end..].copy_from_slice(&checksum);

        let reader = ArchiveReader::from_bytes(data).unwrap();
        let err = reader.read_store::<TestDoc>("a").unwrap_err();
        assert!(matches!(err, ArchiveError::CrcMismatch { .. }));
    }

    #[test]
    fn disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.docket");

        let store = make_store(&[("1", "alice", 30)]);
        let mut writer = ArchiveWriter::new();
        writer.append_store("disk", &store).unwrap();
        writer.finish_to_path(&path).unwrap();

        let reader = ArchiveReader::open(&path).unwrap();
        let restored: Store<TestDoc> = reader.read_store("disk").unwrap();
        assert_eq!(restored.hash().unwrap(), store.hash().unwrap());
    }
}
