use thiserror::Error;

/// Errors from archive reading and writing.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The container does not start with the archive magic tag.
    #[error("invalid archive magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: String, actual: String },

    /// The container was written with an unknown format version.
    #[error("unsupported archive version: {0}")]
    UnsupportedVersion(u32),

    /// The container-wide checksum does not match its contents.
    #[error("archive checksum mismatch")]
    ChecksumMismatch,

    /// No entry with the requested name exists in the container.
    #[error("entry {0:?} not found in archive")]
    EntryNotFound(String),

    /// An entry's framing is malformed.
    #[error("corrupt archive entry at offset {offset}: {reason}")]
    CorruptEntry { offset: u64, reason: String },

    /// An entry's payload CRC does not match.
    #[error("CRC32 mismatch for entry {name:?}")]
    CrcMismatch { name: String },

    /// Compressing a snapshot failed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// Decompressing an entry failed.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// Error from the snapshot codec while encoding or decoding an entry.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] docket_snapshot::SnapshotError),

    /// I/O error from the underlying file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
