//! Typed in-memory document store for Docket.
//!
//! A [`Store<T>`] owns a keyed collection of versioned [`Document<T>`]
//! records of one concrete payload type. It exposes whole-record
//! replace-or-insert writes, copy-on-read retrieval, ad-hoc querying
//! (filter/sort/limit), and an order-independent content hash over the
//! stored `(id, data)` pairs.
//!
//! # Design Rules
//!
//! 1. One store instance is bound to exactly one concrete payload type.
//! 2. The empty [`DocId`](docket_types::DocId) is a reserved sentinel and
//!    never a valid stored key.
//! 3. `created_at` is fixed at first insertion; `updated_at` is
//!    monotonically non-decreasing across writes to the same id.
//! 4. Reads return clones; callers can never mutate stored state through
//!    a returned document.
//! 5. A single reader/writer lock guards each store; readers proceed
//!    concurrently, writers exclusively.
//! 6. Raw iteration order is unspecified; only explicit query sorts order
//!    results.

pub mod document;
pub mod error;
pub mod hash;
pub mod query;
pub mod store;

pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use hash::hash_documents;
pub use query::{Query, QueryFilter, QueryResult, QuerySort};
pub use store::Store;
