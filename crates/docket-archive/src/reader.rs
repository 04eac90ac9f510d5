use std::ops::Range;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use docket_store::Store;

use crate::error::{ArchiveError, ArchiveResult};
use crate::writer::{read_varint, ARCHIVE_MAGIC, ARCHIVE_VERSION, END_SENTINEL, ENTRY_MARKER};

/// Metadata for one entry in an archive container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Caller-chosen name the snapshot was stored under.
    pub name: String,
    /// Wall-clock time the entry was appended.
    pub modified_at: DateTime<Utc>,
    /// Uncompressed snapshot size in bytes.
    pub size: u64,
}

struct RawEntry {
    meta: ArchiveEntry,
    crc32: u32,
    payload: Range<usize>,
}

/// Reads snapshots out of an archive container.
///
/// Lookups are linear scans from the start of the container; the first
/// entry whose name matches wins. There is no random access.
#[derive(Debug)]
pub struct ArchiveReader {
    data: Vec<u8>,
}

impl ArchiveReader {
    /// Open a container from raw bytes, validating the magic, version,
    /// and container-wide checksum.
    pub fn from_bytes(data: Vec<u8>) -> ArchiveResult<Self> {
        // Header (8) + end sentinel (1) + BLAKE3 checksum (32).
        if data.len() < 8 + 1 + 32 {
            return Err(ArchiveError::CorruptEntry {
                offset: 0,
                reason: "container too short".to_string(),
            });
        }
        if &data[0..4] != ARCHIVE_MAGIC {
            return Err(ArchiveError::InvalidMagic {
                expected: String::from_utf8_lossy(ARCHIVE_MAGIC).into_owned(),
                actual: String::from_utf8_lossy(&data[0..4]).into_owned(),
            });
        }
        let version = u32::from_be_bytes(data[4..8].try_into().expect("sliced 4 bytes"));
        if version != ARCHIVE_VERSION {
            return Err(ArchiveError::UnsupportedVersion(version));
        }

        let body_end = data.len() - 32;
        let expected: [u8; 32] = data[body_end..].try_into().expect("sliced 32 bytes");
        if *blake3::hash(&data[..body_end]).as_bytes() != expected {
            return Err(ArchiveError::ChecksumMismatch);
        }

        Ok(Self { data })
    }

    /// Open a container from a file on disk.
    pub fn open(path: &Path) -> ArchiveResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Decode the first entry named `name` into a freshly constructed
    /// store.
    ///
    /// Scans entries sequentially from the start and returns on the first
    /// match without looking further; a full scan without a match is
    /// [`ArchiveError::EntryNotFound`].
    pub fn read_store<T>(&self, name: &str) -> ArchiveResult<Store<T>>
    where
        T: DeserializeOwned,
    {
        let mut pos = 8;
        while let Some(entry) = self.parse_entry(&mut pos)? {
            if entry.meta.name != name {
                continue;
            }

            let compressed = &self.data[entry.payload];
            if crc32fast::hash(compressed) != entry.crc32 {
                return Err(ArchiveError::CrcMismatch {
                    name: name.to_string(),
                });
            }

            let snapshot = zstd::decode_all(compressed)
                .map_err(|e| ArchiveError::DecompressionFailed(e.to_string()))?;
            if snapshot.len() as u64 != entry.meta.size {
                return Err(ArchiveError::CorruptEntry {
                    offset: 0,
                    reason: format!(
                        "size mismatch for entry {name:?}: expected {}, got {}",
                        entry.meta.size,
                        snapshot.len()
                    ),
                });
            }

            let store = Store::new();
            docket_snapshot::read_from(snapshot.as_slice(), &store)?;
            return Ok(store);
        }

        Err(ArchiveError::EntryNotFound(name.to_string()))
    }

    /// Metadata for every entry, in container order.
    pub fn entries(&self) -> ArchiveResult<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        let mut pos = 8;
        while let Some(entry) = self.parse_entry(&mut pos)? {
            entries.push(entry.meta);
        }
        Ok(entries)
    }

    /// Returns `true` if any entry carries the given name.
    pub fn contains(&self, name: &str) -> bool {
        matches!(
            self.entries(),
            Ok(entries) if entries.iter().any(|e| e.name == name)
        )
    }

    /// Parse the entry at `*pos`, advancing past it. Returns `None` at
    /// the end sentinel.
    fn parse_entry(&self, pos: &mut usize) -> ArchiveResult<Option<RawEntry>> {
        let data = &self.data;
        let offset = *pos as u64;

        let marker = *data.get(*pos).ok_or_else(|| ArchiveError::CorruptEntry {
            offset,
            reason: "missing end sentinel".to_string(),
        })?;
        *pos += 1;

        match marker {
            END_SENTINEL => Ok(None),
            ENTRY_MARKER => {
                let name_len = read_varint(data, pos)? as usize;
                let name_end = pos
                    .checked_add(name_len)
                    .filter(|&end| end <= data.len())
                    .ok_or_else(|| ArchiveError::CorruptEntry {
                        offset,
                        reason: "entry name extends beyond container".to_string(),
                    })?;
                let name = std::str::from_utf8(&data[*pos..name_end])
                    .map_err(|e| ArchiveError::CorruptEntry {
                        offset,
                        reason: format!("entry name is not UTF-8: {e}"),
                    })?
                    .to_string();
                *pos = name_end;

                if *pos + 8 > data.len() {
                    return Err(ArchiveError::CorruptEntry {
                        offset,
                        reason: "truncated entry timestamp".to_string(),
                    });
                }
                let mtime_ms =
                    i64::from_be_bytes(data[*pos..*pos + 8].try_into().expect("sliced 8 bytes"));
                *pos += 8;
                let modified_at = DateTime::from_timestamp_millis(mtime_ms).ok_or_else(|| {
                    ArchiveError::CorruptEntry {
                        offset,
                        reason: format!("entry timestamp out of range: {mtime_ms}"),
                    }
                })?;

                let size = read_varint(data, pos)?;
                let compressed_len = read_varint(data, pos)? as usize;

                if *pos + 4 > data.len() {
                    return Err(ArchiveError::CorruptEntry {
                        offset,
                        reason: "truncated entry CRC".to_string(),
                    });
                }
                let crc32 =
                    u32::from_be_bytes(data[*pos..*pos + 4].try_into().expect("sliced 4 bytes"));
                *pos += 4;

                let payload_end = pos
                    .checked_add(compressed_len)
                    .filter(|&end| end <= data.len())
                    .ok_or_else(|| ArchiveError::CorruptEntry {
                        offset,
                        reason: "entry payload extends beyond container".to_string(),
                    })?;
                let payload = *pos..payload_end;
                *pos = payload_end;

                Ok(Some(RawEntry {
                    meta: ArchiveEntry {
                        name,
                        modified_at,
                        size,
                    },
                    crc32,
                    payload,
                }))
            }
            other => Err(ArchiveError::CorruptEntry {
                offset,
                reason: format!("unknown entry marker: {other}"),
            }),
        }
    }
}
