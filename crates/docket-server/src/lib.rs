//! HTTP layer for Docket stores.
//!
//! Translates store operations to HTTP endpoints and store errors to
//! transport status codes: a missing document is 404, an empty or
//! mismatched id/type is 400, anything else is 500. Writes that supply no
//! document id get a freshly generated one.
//!
//! The router is built per payload type with [`document_routes`] (over an
//! explicitly owned store) or [`registry_routes`] (over the process-wide
//! default store for the type), then mounted and served by
//! [`DocketServer`].

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::{document_routes, registry_routes};
pub use server::DocketServer;

/// Install a process-wide tracing subscriber with sensible defaults.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().try_init();
}
