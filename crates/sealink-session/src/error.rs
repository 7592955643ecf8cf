//! Session-level error kinds
//!
//! Every failure from the crypto and link layers is translated into one of
//! these kinds at the session boundary. On the receiving side they are
//! further collapsed into a single generic message before reaching the user.

use sealink_crypto::CryptoError;
use sealink_link::LinkError;

use crate::session::SessionState;

/// Result type alias for session operations.
pub type ShareResult<T> = std::result::Result<T, ShareError>;

/// Errors surfaced by a [`ShareSession`](crate::ShareSession).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    // ============================================================
    // User-facing errors (actionable)
    // ============================================================
    /// The selected file is above the configured ceiling.
    #[error("File too large: {size} bytes (maximum is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// The operation is not allowed in the current state.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    // ============================================================
    // Translated crypto and codec errors
    // ============================================================
    /// The platform could not supply secure randomness.
    #[error("Secure randomness unavailable: {0}")]
    EntropyUnavailable(String),

    /// The key token does not hold a 256-bit key.
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// The package token could not be parsed.
    #[error("Malformed package: {0}")]
    MalformedPackage(String),

    /// The ciphertext did not verify under the key.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Encrypting or encoding the file failed.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}

impl From<CryptoError> for ShareError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::EntropyUnavailable(s) => ShareError::EntropyUnavailable(s),
            CryptoError::MalformedKey { .. } => ShareError::MalformedKey(e.to_string()),
            CryptoError::AuthenticationFailed => ShareError::AuthenticationFailed,
            CryptoError::EncryptionFailed(s) => ShareError::EncryptionFailed(s),
        }
    }
}

impl From<LinkError> for ShareError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::Serialization(s) => ShareError::EncryptionFailed(s),
            LinkError::MalformedPackage(s) => ShareError::MalformedPackage(s),
            LinkError::Base64(e) => ShareError::MalformedPackage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShareError::FileTooLarge {
            size: 2_097_153,
            limit: 2_097_152,
        };
        assert!(err.to_string().contains("2097153"));
        assert!(err.to_string().contains("2097152"));

        let err = ShareError::InvalidState {
            operation: "encrypt",
            state: SessionState::Idle,
        };
        assert_eq!(err.to_string(), "Cannot encrypt while idle");
    }

    #[test]
    fn test_crypto_error_translation() {
        let err: ShareError = CryptoError::MalformedKey {
            expected: 32,
            actual: 5,
        }
        .into();
        match err {
            ShareError::MalformedKey(reason) => assert!(reason.contains("5")),
            other => panic!("unexpected {other:?}"),
        }

        let err: ShareError = CryptoError::AuthenticationFailed.into();
        assert_eq!(err, ShareError::AuthenticationFailed);

        let err: ShareError = CryptoError::EntropyUnavailable("no rng".into()).into();
        assert_eq!(err, ShareError::EntropyUnavailable("no rng".into()));
    }

    #[test]
    fn test_link_error_translation() {
        let err: ShareError = LinkError::MalformedPackage("bad".into()).into();
        assert_eq!(err, ShareError::MalformedPackage("bad".into()));

        let err: ShareError = LinkError::Serialization("json".into()).into();
        assert_eq!(err, ShareError::EncryptionFailed("json".into()));
    }
}
