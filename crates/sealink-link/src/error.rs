//! Error types for sealink-link

use thiserror::Error;

/// Errors raised while encoding or decoding link tokens
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Invalid url-safe base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Malformed package: {0}")]
    MalformedPackage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;
