//! File encryption with per-call random nonces
//!
//! [`Cipher`] combines a [`SecureRandomSource`] for nonces with an
//! [`AeadCipher`] primitive. Each call to [`Cipher::encrypt`] draws a fresh
//! 96-bit nonce, so a key is never used twice with the same nonce as long as
//! the random source is sound.

use std::fmt;
use std::sync::Arc;

use crate::aead::{AeadCipher, Aes256GcmCipher, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;
use crate::random::{OsRandom, SecureRandomSource};

/// Nonce size (12 bytes, 96 bits)
pub const NONCE_SIZE: usize = 12;

/// Ciphertext with the nonce it was sealed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedData {
    /// Nonce used for encryption
    pub nonce: [u8; NONCE_SIZE],
    /// Encrypted content with authentication tag
    pub ciphertext: Vec<u8>,
}

/// Authenticated encryption of file bytes
#[derive(Clone)]
pub struct Cipher {
    random: Arc<dyn SecureRandomSource>,
    aead: Arc<dyn AeadCipher>,
}

impl Cipher {
    /// Create a cipher from explicit capabilities
    pub fn new(random: Arc<dyn SecureRandomSource>, aead: Arc<dyn AeadCipher>) -> Self {
        Self { random, aead }
    }

    /// AES-256-GCM with nonces from the operating system RNG
    pub fn system() -> Self {
        Self::new(Arc::new(OsRandom), Arc::new(Aes256GcmCipher))
    }

    /// Encrypt `plaintext` under `key` with a fresh random nonce
    ///
    /// # Errors
    ///
    /// [`CryptoError::EntropyUnavailable`] if no nonce can be drawn,
    /// [`CryptoError::EncryptionFailed`] if the primitive rejects the input.
    pub fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> CryptoResult<SealedData> {
        let mut nonce = [0u8; NONCE_SIZE];
        self.random.fill_bytes(&mut nonce)?;

        let ciphertext = self.aead.seal(key, &nonce, plaintext)?;

        Ok(SealedData { nonce, ciphertext })
    }

    /// Verify and decrypt
    ///
    /// Every failure, whatever its cause, is reported as
    /// [`CryptoError::AuthenticationFailed`].
    pub fn decrypt(
        &self,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
        key: &SymmetricKey,
    ) -> CryptoResult<Vec<u8>> {
        if ciphertext.len() < TAG_SIZE {
            return Err(CryptoError::AuthenticationFailed);
        }

        self.aead
            .open(key, nonce, ciphertext)
            .map_err(|_| CryptoError::AuthenticationFailed)
    }

    /// Decrypt a [`SealedData`] value
    pub fn decrypt_sealed(&self, sealed: &SealedData, key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
        self.decrypt(&sealed.nonce, &sealed.ciphertext, key)
    }
}

impl Default for Cipher {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}
