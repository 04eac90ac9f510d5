use thiserror::Error;

/// Errors from server setup and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from the registry while building routes.
    #[error("registry error: {0}")]
    Registry(#[from] docket_registry::RegistryError),

    /// I/O error while binding or serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other serving failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
