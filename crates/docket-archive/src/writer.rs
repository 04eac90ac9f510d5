use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use docket_store::Store;

use crate::error::{ArchiveError, ArchiveResult};

/// Fixed 4-byte tag identifying a valid archive container.
pub const ARCHIVE_MAGIC: &[u8; 4] = b"DKA1";

/// Current archive format version.
pub const ARCHIVE_VERSION: u32 = 1;

/// Marker byte preceding every entry.
pub(crate) const ENTRY_MARKER: u8 = 0x01;

/// Sentinel byte terminating the entry sequence.
pub(crate) const END_SENTINEL: u8 = 0x00;

/// Builds an archive container from named store snapshots.
///
/// Entries are appended strictly in call order and never overwritten or
/// reordered; the same name may appear more than once, in which case
/// readers resolve it to the earliest entry. The writer adds no locking of
/// its own; concurrent writers to one container must be serialized by the
/// caller.
pub struct ArchiveWriter {
    buf: Vec<u8>,
    entry_count: usize,
}

impl ArchiveWriter {
    /// Start a new empty container.
    pub fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(ARCHIVE_MAGIC);
        buf.extend_from_slice(&ARCHIVE_VERSION.to_be_bytes());
        Self {
            buf,
            entry_count: 0,
        }
    }

    /// Serialize `store` as a snapshot and append it under `name`.
    pub fn append_store<T>(&mut self, name: &str, store: &Store<T>) -> ArchiveResult<()>
    where
        T: Serialize + Clone,
    {
        let mut snapshot = Vec::new();
        docket_snapshot::write_to(store, &mut snapshot)?;
        self.append_entry(name, &snapshot)
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entry_count
    }

    /// Returns `true` if no entries have been appended.
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Finalize the container: append the end sentinel and a BLAKE3
    /// checksum of everything before it, and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.push(END_SENTINEL);
        let checksum = *blake3::hash(&self.buf).as_bytes();
        self.buf.extend_from_slice(&checksum);
        self.buf
    }

    /// Finalize the container and write it to `path`.
    pub fn finish_to_path(self, path: &Path) -> ArchiveResult<()> {
        let data = self.finish();
        std::fs::write(path, data)?;
        Ok(())
    }

    fn append_entry(&mut self, name: &str, snapshot: &[u8]) -> ArchiveResult<()> {
        let compressed = zstd::encode_all(snapshot, 3)
            .map_err(|e| ArchiveError::CompressionFailed(e.to_string()))?;

        self.buf.push(ENTRY_MARKER);
        encode_varint(&mut self.buf, name.len() as u64);
        self.buf.extend_from_slice(name.as_bytes());
        self.buf
            .extend_from_slice(&Utc::now().timestamp_millis().to_be_bytes());
        encode_varint(&mut self.buf, snapshot.len() as u64);
        encode_varint(&mut self.buf, compressed.len() as u64);
        self.buf
            .extend_from_slice(&crc32fast::hash(&compressed).to_be_bytes());
        self.buf.extend_from_slice(&compressed);

        self.entry_count += 1;
        tracing::debug!(
            name,
            uncompressed = snapshot.len(),
            compressed = compressed.len(),
            "archive entry appended"
        );
        Ok(())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a u64 as a variable-length integer.
pub(crate) fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Read a variable-length integer starting at `*pos`, advancing `*pos`
/// past it.
pub(crate) fn read_varint(data: &[u8], pos: &mut usize) -> ArchiveResult<u64> {
    let start = *pos;
    let mut value: u64 = 0;
    let mut shift = 0;
    while let Some(&byte) = data.get(*pos) {
        *pos += 1;
        value |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift >= 64 {
            return Err(ArchiveError::CorruptEntry {
                offset: start as u64,
                reason: "varint overflow".to_string(),
            });
        }
    }
    Err(ArchiveError::CorruptEntry {
        offset: start as u64,
        reason: "truncated varint".to_string(),
    })
}
