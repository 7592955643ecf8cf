//! Error types for sealink-crypto

use thiserror::Error;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Secure randomness unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Malformed key: expected {expected} bytes, got {actual}")]
    MalformedKey { expected: usize, actual: usize },

    /// Wrong key, corrupted or tampered ciphertext, and truncation all land
    /// here. AEAD gives no finer signal.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Result type for crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;
