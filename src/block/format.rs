//! Single-buffer framing and serde helpers for `Block`.
//!
//! The core format deliberately carries no length prefixes: salt and IV are
//! fixed at 16 bytes each, and the header/data region lengths are agreed
//! out-of-band by both parties.  When a single opaque buffer is more
//! convenient than four fields, `to_bytes` / `from_bytes` concatenate the
//! regions in this order:
//!
//! ```text
//! [salt: 16 bytes][iv: 16 bytes][headers: headers_length][data: data_length]
//! ```
//!
//! This is a convenience, not a mandated wire format — any framing that
//! transports the four regions and their lengths works.

use crate::block::{Block, CBC_IV_LENGTH, SALT_LENGTH};
use crate::errors::{BlockcryptError, Result};

impl Block {
    /// Concatenate the four regions into a single buffer:
    /// `salt || iv || headers || data`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = SALT_LENGTH + CBC_IV_LENGTH + self.headers.len() + self.data.len();
        let mut buf = Vec::with_capacity(total);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.iv);
        buf.extend_from_slice(&self.headers);
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Rebuild a block from a buffer produced by `to_bytes`.
    ///
    /// `headers_length` and `data_length` must be the same values both
    /// parties agreed on — the buffer itself cannot reveal them.
    pub fn from_bytes(bytes: &[u8], headers_length: usize, data_length: usize) -> Result<Block> {
        let expected = SALT_LENGTH + CBC_IV_LENGTH + headers_length + data_length;
        if bytes.len() != expected {
            return Err(BlockcryptError::InvalidBlockFormat(format!(
                "expected {expected} bytes, got {}",
                bytes.len()
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_LENGTH);
        let (iv, rest) = rest.split_at(CBC_IV_LENGTH);
        let (headers, data) = rest.split_at(headers_length);

        let salt: [u8; SALT_LENGTH] = salt
            .try_into()
            .map_err(|_| BlockcryptError::InvalidBlockFormat("bad salt length".into()))?;
        let iv: [u8; CBC_IV_LENGTH] = iv
            .try_into()
            .map_err(|_| BlockcryptError::InvalidBlockFormat("bad iv length".into()))?;

        Ok(Block {
            salt,
            iv,
            headers: headers.to_vec(),
            data: data.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded byte fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

pub(crate) fn base64_encode<T, S>(data: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data.as_ref());
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn base64_decode_array<'de, D, const N: usize>(
    deserializer: D,
) -> std::result::Result<[u8; N], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes = base64_decode(deserializer)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| serde::de::Error::custom(format!("expected {N} bytes, got {len}")))
}
