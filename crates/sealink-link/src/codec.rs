//! Url-safe text encoding of raw bytes
//!
//! Plain base64 uses `+`, `/` and `=`, all of which are unsafe or carry
//! meaning inside a URL fragment. Tokens embedded in share links use the
//! url-safe alphabet (`-` and `_`) with the padding stripped. Decoding
//! restores the padding first, so both padded and unpadded tokens decode.

use base64::{
    Engine,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

use crate::error::LinkResult;

/// Encode bytes as url-safe base64 without padding
pub fn to_url_safe_text(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode url-safe base64, with or without padding
pub fn from_url_safe_text(text: &str) -> LinkResult<Vec<u8>> {
    Ok(URL_SAFE.decode(restore_padding(text))?)
}

/// Right-pad `text` with `=` until its length is a multiple of 4
pub fn restore_padding(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 3);
    padded.push_str(text);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}
