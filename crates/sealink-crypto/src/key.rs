//! Symmetric key management for share links
//!
//! Every share gets its own [`SymmetricKey`]. The key lives in the sender's
//! memory until it is exported into the link, and is rebuilt transiently on
//! the receiving side from that link. It is never persisted.

use std::fmt;
use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CryptoError, CryptoResult};
use crate::random::{OsRandom, SecureRandomSource};

/// Key size (32 bytes, AES-256)
pub const KEY_SIZE: usize = 32;

/// Opaque 256-bit key for authenticated encryption
///
/// Wiped from memory when dropped. The `Debug` output never includes the
/// key material.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Get the raw key bytes (use with caution)
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Generates, exports and imports [`SymmetricKey`]s
#[derive(Clone)]
pub struct KeyManager {
    random: Arc<dyn SecureRandomSource>,
}

impl KeyManager {
    /// Create a key manager drawing from the given random source
    pub fn new(random: Arc<dyn SecureRandomSource>) -> Self {
        Self { random }
    }

    /// Key manager backed by the operating system RNG
    pub fn system() -> Self {
        Self::new(Arc::new(OsRandom))
    }

    /// Generate a fresh random key
    pub fn generate(&self) -> CryptoResult<SymmetricKey> {
        let mut key = SymmetricKey {
            key: [0u8; KEY_SIZE],
        };
        self.random.fill_bytes(&mut key.key)?;
        Ok(key)
    }

    /// Export the raw key material (exactly [`KEY_SIZE`] bytes)
    ///
    /// The returned buffer is wiped when dropped.
    pub fn export(&self, key: &SymmetricKey) -> Zeroizing<[u8; KEY_SIZE]> {
        Zeroizing::new(key.key)
    }

    /// Rebuild a key from exported bytes
    pub fn import(&self, bytes: &[u8]) -> CryptoResult<SymmetricKey> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::MalformedKey {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(SymmetricKey { key })
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager").finish_non_exhaustive()
    }
}
