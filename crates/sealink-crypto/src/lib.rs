//! # Sealink Crypto
//!
//! Key management and authenticated encryption for share links.
//!
//! ## Features
//!
//! - AES-256-GCM authenticated encryption of file bytes
//! - Fresh 256-bit key per share, zeroized on drop
//! - Fresh 96-bit nonce per encryption call
//! - Injectable randomness ([`SecureRandomSource`]) and primitive
//!   ([`AeadCipher`]) so the protocol can be tested deterministically
//!
//! ## Example
//!
//! ```rust
//! use sealink_crypto::{Cipher, KeyManager};
//!
//! let keys = KeyManager::system();
//! let cipher = Cipher::system();
//!
//! let key = keys.generate().unwrap();
//! let sealed = cipher.encrypt(b"Hello, world!", &key).unwrap();
//!
//! // The receiver rebuilds the key from its exported bytes
//! let exported = keys.export(&key);
//! let imported = keys.import(exported.as_slice()).unwrap();
//! let plaintext = cipher
//!     .decrypt(&sealed.nonce, &sealed.ciphertext, &imported)
//!     .unwrap();
//! assert_eq!(plaintext, b"Hello, world!");
//! ```

pub mod aead;
pub mod cipher;
pub mod error;
pub mod key;
pub mod random;

// Re-exports
pub use aead::{AeadCipher, Aes256GcmCipher, TAG_SIZE};
pub use cipher::{Cipher, NONCE_SIZE, SealedData};
pub use error::{CryptoError, CryptoResult};
pub use key::{KEY_SIZE, KeyManager, SymmetricKey};
pub use random::{FailingRandom, OsRandom, SecureRandomSource, SeededRandom};
