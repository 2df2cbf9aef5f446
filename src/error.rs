//! Error types for reprise
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Source-boundary errors are caught and logged by the
//! controller rather than propagated to command callers.

use thiserror::Error;

/// Main error type for the reprise service
#[derive(Error, Debug)]
pub enum Error {
    /// Bad path or unreadable media file
    #[error("Source error: {0}")]
    Source(String),

    /// Decoder rejected the media data
    #[error("Prepare error: {0}")]
    Prepare(String),

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using the reprise Error
pub type Result<T> = std::result::Result<T, Error>;
