//! Foundation types for Docket.
//!
//! This crate provides the document identifier type used throughout the
//! Docket document store. Every other Docket crate depends on
//! `docket-types`.
//!
//! # Key Types
//!
//! - [`DocId`] — Opaque string identifier for a document. The empty string
//!   is the reserved "unassigned" sentinel and is never a valid stored key.

pub mod id;

pub use id::{DocId, GENERATED_ID_LEN};
