//! The block format: one fixed-size opaque artifact holding any number of
//! independently-passphrase-protected secrets.
//!
//! A block has four regions:
//!
//! ```text
//! [salt: 16 bytes][iv: 16 bytes][headers: headersLength][data: dataLength]
//! ```
//!
//! - **salt** and **iv** are shared by every secret in the block.
//! - **headers** is the concatenation of per-secret CBC-encrypted
//!   `"<offset>:<length>"` descriptors, padded to `headersLength` with
//!   CSPRNG noise.
//! - **data** is the concatenation of per-secret frames
//!   `ciphertext || iv(12) || tag(16)`, padded to `dataLength` with
//!   CSPRNG noise.
//!
//! Without a passphrase there is no way to tell where real content ends and
//! noise begins, or how many secrets the block holds.  There is no index:
//! the decoder locates a secret's descriptor by trial-decrypting header
//! byte ranges (see `decode`).

use serde::{Deserialize, Serialize};

pub mod decode;
pub mod encode;
pub mod format;
pub mod secret;

pub use decode::decode;
pub use encode::{encode, encode_with_options, EncodeOptions};
pub use secret::Secret;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of the shared block salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Size of the block-level CBC initialization vector in bytes.
pub const CBC_IV_LENGTH: usize = 16;

/// Size of a per-secret GCM initialization vector in bytes.
pub const GCM_IV_LENGTH: usize = 12;

/// Size of a GCM authentication tag in bytes.
pub const GCM_TAG_LENGTH: usize = 16;

/// Fixed per-frame overhead after the ciphertext: IV + auth tag.
pub const FRAME_TRAILER_LENGTH: usize = GCM_IV_LENGTH + GCM_TAG_LENGTH;

/// Headers length used when the caller does not supply one.
pub const DEFAULT_HEADERS_LENGTH: usize = 64;

/// Region sizes must be a positive multiple of this.
pub const LENGTH_INCREMENT: usize = 8;

/// Granularity of the inferred data length.
pub(crate) const DATA_LENGTH_ROUNDING: usize = 64;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// The only persisted artifact: salt, shared IV, header region, data region.
///
/// Immutable once produced by `encode`; safely shared by any number of
/// concurrent `decode` calls.  Byte fields serialize as base64 strings in
/// JSON for readability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Salt shared by every secret's key derivation (16 bytes).
    #[serde(
        serialize_with = "format::base64_encode",
        deserialize_with = "format::base64_decode_array"
    )]
    pub salt: [u8; SALT_LENGTH],

    /// Block-level CBC IV shared by every header entry (16 bytes).
    #[serde(
        serialize_with = "format::base64_encode",
        deserialize_with = "format::base64_decode_array"
    )]
    pub iv: [u8; CBC_IV_LENGTH],

    /// Header region: encrypted descriptors plus noise.
    #[serde(
        serialize_with = "format::base64_encode",
        deserialize_with = "format::base64_decode"
    )]
    pub headers: Vec<u8>,

    /// Data region: encrypted frames plus noise.
    #[serde(
        serialize_with = "format::base64_encode",
        deserialize_with = "format::base64_decode"
    )]
    pub data: Vec<u8>,
}

/// Minimal valid `data_length` for a single secret of this size:
/// message length plus the 28-byte frame trailer, rounded up to the next
/// multiple of 8.
pub fn estimate_data_length(message: &[u8]) -> usize {
    round_up(message.len() + FRAME_TRAILER_LENGTH, LENGTH_INCREMENT)
}

/// Round `value` up to the next multiple of `multiple`.
pub(crate) fn round_up(value: usize, multiple: usize) -> usize {
    value.div_euclid(multiple) * multiple + if value % multiple == 0 { 0 } else { multiple }
}
