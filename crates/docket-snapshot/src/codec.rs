use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use docket_store::{hash_documents, Document, Store};

use crate::error::{SnapshotError, SnapshotResult};
use crate::header::{doc_type, SnapshotHeader, SNAPSHOT_MAGIC};

/// Serialize a store's full content into `writer`.
///
/// Writes the header (magic, timestamp, payload type, content hash), then
/// one record per document. The document set and its hash are captured
/// from a single point-in-time snapshot of the store, so concurrent
/// writers can never produce a half-updated stream. Returns the number of
/// bytes written.
pub fn write_to<T, W>(store: &Store<T>, writer: W) -> SnapshotResult<u64>
where
    T: Serialize + Clone,
    W: Write,
{
    let documents = store.documents();
    let hash = hash_documents(documents.iter())?;
    let header = SnapshotHeader::new::<T>(hash);

    let mut out = CountingWriter::new(writer);
    serde_json::to_writer(&mut out, &header)
        .map_err(|e| SnapshotError::Header(e.to_string()))?;
    out.write_all(b"\n")?;

    for (index, doc) in documents.iter().enumerate() {
        serde_json::to_writer(&mut out, doc).map_err(|e| SnapshotError::Record {
            index,
            reason: e.to_string(),
        })?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    tracing::debug!(records = documents.len(), bytes = out.written, "snapshot written");
    Ok(out.written)
}

/// Restore documents from `reader` into `store`.
///
/// Parses and validates the header first: a wrong magic is
/// [`SnapshotError::InvalidMagic`], a payload type other than `T` is
/// [`SnapshotError::MismatchedDocType`]. Document records are then read
/// until the stream is exhausted and inserted directly under their own
/// ids, timestamps preserved exactly as encoded (a raw load, not a put).
/// Returns the number of bytes consumed.
pub fn read_from<T, R>(reader: R, store: &Store<T>) -> SnapshotResult<u64>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut stream =
        serde_json::Deserializer::from_reader(reader).into_iter::<serde_json::Value>();

    let header_value = match stream.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(SnapshotError::Header(e.to_string())),
        None => return Err(SnapshotError::Header("empty stream".to_string())),
    };
    let header: SnapshotHeader = serde_json::from_value(header_value)
        .map_err(|e| SnapshotError::Header(e.to_string()))?;

    if header.magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::InvalidMagic {
            expected: SNAPSHOT_MAGIC.to_string(),
            actual: header.magic,
        });
    }
    let expected = doc_type::<T>();
    if header.doc_type != expected {
        return Err(SnapshotError::MismatchedDocType {
            expected: expected.to_string(),
            actual: header.doc_type,
        });
    }

    let mut records = 0usize;
    while let Some(item) = stream.next() {
        let value = item.map_err(|e| SnapshotError::Record {
            index: records,
            reason: e.to_string(),
        })?;
        let doc: Document<T> = serde_json::from_value(value).map_err(|e| SnapshotError::Record {
            index: records,
            reason: e.to_string(),
        })?;
        store.load(doc)?;
        records += 1;
    }

    tracing::debug!(records, bytes = stream.byte_offset(), "snapshot restored");
    Ok(stream.byte_offset() as u64)
}

/// `Write` adapter tracking how many bytes passed through.
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
