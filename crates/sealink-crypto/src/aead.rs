//! AEAD primitive abstraction
//!
//! [`AeadCipher`] is the seam between the share protocol and the actual
//! cipher implementation. The wire format fixes a 12 byte nonce and a
//! 16 byte tag, which [`Aes256GcmCipher`] provides.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};

use crate::cipher::NONCE_SIZE;
use crate::error::{CryptoError, CryptoResult};
use crate::key::SymmetricKey;

/// Authentication tag size appended to every ciphertext (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Authenticated symmetric encryption primitive
pub trait AeadCipher: Send + Sync {
    /// Encrypt and authenticate `plaintext`, returning ciphertext || tag
    fn seal(
        &self,
        key: &SymmetricKey,
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>>;

    /// Verify the tag and decrypt `ciphertext` (ciphertext || tag)
    fn open(
        &self,
        key: &SymmetricKey,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>>;
}

/// AES-256-GCM, the cipher share links are minted with
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmCipher;

impl AeadCipher for Aes256GcmCipher {
    fn seal(
        &self,
        key: &SymmetricKey,
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    fn open(
        &self,
        key: &SymmetricKey,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyManager;

    #[test]
    fn test_seal_appends_tag() {
        let key = KeyManager::system().generate().unwrap();
        let nonce = [3u8; NONCE_SIZE];

        let sealed = Aes256GcmCipher.seal(&key, &nonce, b"hello").unwrap();
        assert_eq!(sealed.len(), 5 + TAG_SIZE);

        let opened = Aes256GcmCipher.open(&key, &nonce, &sealed).unwrap();
        assert_eq!(opened, b"hello");
    }

    #[test]
    fn test_open_with_other_nonce_fails() {
        let key = KeyManager::system().generate().unwrap();
        let sealed = Aes256GcmCipher.seal(&key, &[1u8; NONCE_SIZE], b"data").unwrap();

        let result = Aes256GcmCipher.open(&key, &[2u8; NONCE_SIZE], &sealed);
        assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }

    #[test]
    fn test_open_shorter_than_tag_fails() {
        let key = KeyManager::system().generate().unwrap();
        let result = Aes256GcmCipher.open(&key, &[0u8; NONCE_SIZE], &[0u8; TAG_SIZE - 1]);
        assert!(matches!(result, Err(CryptoError::AuthenticationFailed)));
    }
}
