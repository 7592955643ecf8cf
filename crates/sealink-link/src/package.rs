//! Encrypted package envelope
//!
//! A package carries everything a receiver needs apart from the key: the
//! nonce, the ciphertext and the file metadata. It is serialized into a
//! single url-safe token.
//!
//! # Format
//!
//! ```text
//! url-safe-base64( {"iv": "<base64 nonce>", "data": "<base64 ciphertext>",
//!                   "meta": {"name": "...", "type": "...", "size": 123}} )
//! ```
//!
//! The inner `iv` and `data` fields use the standard padded alphabet. The
//! layout matches links minted by the Secure Share web client, so either side
//! can open the other's links.
//!
//! The web client encodes the JSON text with `btoa`, one byte per character,
//! so a name like `café.txt` arrives as Latin-1 rather than UTF-8. Reading
//! accepts both. Writing escapes every non-ASCII character as `\uXXXX`,
//! which keeps the token plain ASCII and readable by either side.
//!
//! The metadata sits outside the AEAD boundary. Whoever controls the link
//! text can change the displayed name, type or size without breaking
//! decryption of the bytes.

use std::io;

use base64::{Engine, engine::general_purpose::STANDARD};
use sealink_crypto::{NONCE_SIZE, SealedData};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::codec::{from_url_safe_text, to_url_safe_text};
use crate::error::{LinkError, LinkResult};

/// MIME type assumed when the source does not report one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Name, type and size of the shared file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

impl FileMetadata {
    /// Create metadata, falling back to [`DEFAULT_MIME_TYPE`] for an empty type
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        let mime_type = mime_type.into();
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            mime_type
        };

        Self {
            name: name.into(),
            mime_type,
            size_bytes,
        }
    }
}

/// Nonce, ciphertext and metadata of one share
///
/// Built once per share and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPackage {
    /// Nonce the ciphertext was sealed under
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with authentication tag
    pub ciphertext: Vec<u8>,
    /// Unauthenticated file metadata
    pub metadata: FileMetadata,
}

impl EncryptedPackage {
    /// Bundle sealed data with its metadata
    pub fn new(sealed: SealedData, metadata: FileMetadata) -> Self {
        Self {
            nonce: sealed.nonce,
            ciphertext: sealed.ciphertext,
            metadata,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PackageEnvelope {
    iv: String,
    data: String,
    meta: FileMetadata,
}

/// Serialize a package into one opaque url-safe token
pub fn serialize_package(package: &EncryptedPackage) -> LinkResult<String> {
    let envelope = PackageEnvelope {
        iv: STANDARD.encode(package.nonce),
        data: STANDARD.encode(&package.ciphertext),
        meta: package.metadata.clone(),
    };

    let mut json = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, AsciiFormatter);
    envelope
        .serialize(&mut serializer)
        .map_err(|e| LinkError::Serialization(e.to_string()))?;

    Ok(to_url_safe_text(&json))
}

/// JSON formatter that escapes every non-ASCII character as `\uXXXX`
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Envelope JSON as text, accepting UTF-8 or the web client's Latin-1
fn envelope_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Parse a token produced by [`serialize_package`]
///
/// # Errors
///
/// [`LinkError::MalformedPackage`] if the token is not url-safe base64,
/// does not hold the expected JSON envelope, or carries a nonce of the
/// wrong length.
pub fn deserialize_package(token: &str) -> LinkResult<EncryptedPackage> {
    let json = from_url_safe_text(token)
        .map_err(|e| LinkError::MalformedPackage(format!("token is not url-safe base64: {}", e)))?;

    let envelope: PackageEnvelope = serde_json::from_str(&envelope_text(json))
        .map_err(|e| LinkError::MalformedPackage(format!("invalid envelope: {}", e)))?;

    let nonce_bytes = STANDARD
        .decode(&envelope.iv)
        .map_err(|e| LinkError::MalformedPackage(format!("invalid nonce encoding: {}", e)))?;

    let nonce: [u8; NONCE_SIZE] = nonce_bytes.as_slice().try_into().map_err(|_| {
        LinkError::MalformedPackage(format!(
            "nonce must be {} bytes, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        ))
    })?;

    let ciphertext = STANDARD
        .decode(&envelope.data)
        .map_err(|e| LinkError::MalformedPackage(format!("invalid ciphertext encoding: {}", e)))?;

    Ok(EncryptedPackage {
        nonce,
        ciphertext,
        metadata: envelope.meta,
    })
}
