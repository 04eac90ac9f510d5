//! Self-describing snapshot codec for Docket stores.
//!
//! A snapshot is the full content of one store serialized to a byte
//! stream: a header record describing the payload type and content hash,
//! followed by one self-delimiting record per document.
//!
//! # Wire Format
//!
//! Concatenated JSON values, newline-separated:
//!
//! - **Header**: `{magic: "DKS1", timestamp, doc_type, hash}`, where
//!   `doc_type` is the payload's Rust type path and `hash` the store's
//!   content hash at write time.
//! - **Document records**: zero or more full `Document<T>` encodings
//!   (id, created_at, updated_at, data). Records are self-delimiting, so
//!   readers detect stream end without a trailing count.
//!
//! Reading validates the magic and the payload type before any document is
//! consumed, and restores each record's timestamps exactly as encoded. The
//! embedded `hash` is informational metadata for external audits; it is
//! not re-verified against the parsed content.

pub mod codec;
pub mod error;
pub mod header;

pub use codec::{read_from, write_to};
pub use error::{SnapshotError, SnapshotResult};
pub use header::{doc_type, SnapshotHeader, SNAPSHOT_MAGIC};
