//! # Sealink Link
//!
//! Everything that turns an encrypted file into link text and back.
//!
//! - [`codec`]: url-safe base64 with padding stripped and restored
//! - [`package`]: the `{nonce, ciphertext, metadata}` envelope
//! - [`link`]: the `#d=<package>&k=<key>` fragment protocol
//! - [`transport`]: the location a link is read from and cleared in
//!
//! ## Example
//!
//! ```rust
//! use sealink_link::{EncryptedPackage, FileMetadata, link, package};
//!
//! let pkg = EncryptedPackage {
//!     nonce: [0u8; 12],
//!     ciphertext: vec![1, 2, 3],
//!     metadata: FileMetadata::new("a.txt", "text/plain", 3),
//! };
//! let token = package::serialize_package(&pkg).unwrap();
//! let url = link::build("https://example.com/share", &token, "KEYTOKEN");
//!
//! let tokens = link::parse(link::fragment_of(&url)).unwrap();
//! let parsed = package::deserialize_package(&tokens.package).unwrap();
//! assert_eq!(parsed, pkg);
//! ```

pub mod codec;
pub mod error;
pub mod link;
pub mod package;
pub mod transport;

// Re-exports
pub use codec::{from_url_safe_text, restore_padding, to_url_safe_text};
pub use error::{LinkError, LinkResult};
pub use link::{KEY_PARAM, LinkTokens, PACKAGE_PARAM, base_of, build, fragment_of, is_share_fragment, parse};
pub use package::{
    DEFAULT_MIME_TYPE, EncryptedPackage, FileMetadata, deserialize_package, serialize_package,
};
pub use transport::{LinkTransport, MemoryLocation};
