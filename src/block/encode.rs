//! Block encoder.
//!
//! Turns a list of secrets into a `Block`.  For each secret in input order:
//! derive its key, AEAD-encrypt the message under a fresh per-secret IV,
//! append the `ciphertext || iv || tag` frame to the data region, and append
//! a CBC-encrypted `"<offset>:<length>"` descriptor to the header region.
//! Both regions are then padded to their fixed target lengths with CSPRNG
//! noise, so the finished block never reveals how many secrets it holds.

use crate::block::secret::validate_secrets;
use crate::block::{
    round_up, Block, Secret, CBC_IV_LENGTH, DATA_LENGTH_ROUNDING, DEFAULT_HEADERS_LENGTH,
    FRAME_TRAILER_LENGTH, GCM_IV_LENGTH, LENGTH_INCREMENT, SALT_LENGTH,
};
use crate::crypto::{derive_block_key, encrypt_cbc, encrypt_gcm, random_array, random_bytes, Kdf};
use crate::errors::{BlockcryptError, Result};

/// Optional encode parameters.
///
/// `headers_length` and `data_length` must be positive multiples of 8 when
/// supplied.  `salt` and `iv` override the random block salt and block IV
/// and exist only to make unit tests deterministic — never set them in
/// production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Target header region size (defaults to 64).
    pub headers_length: Option<usize>,

    /// Target data region size (defaults to twice the first secret's frame
    /// length, rounded up to the next multiple of 64).
    pub data_length: Option<usize>,

    /// Fixed block salt, for deterministic tests only.
    pub salt: Option<[u8; SALT_LENGTH]>,

    /// Fixed block IV, for deterministic tests only.
    pub iv: Option<[u8; CBC_IV_LENGTH]>,
}

/// Encode `secrets` into a block using default sizes and random salt/IV.
///
/// Each secret's key comes from one `kdf` call over its passphrase and the
/// hex-encoded block salt.  Encoding is atomic: either every secret is
/// packed or an error is returned and nothing is.
pub fn encode(secrets: &[Secret], kdf: &dyn Kdf) -> Result<Block> {
    encode_with_options(secrets, kdf, &EncodeOptions::default())
}

/// Encode `secrets` into a block with explicit region sizes and/or a fixed
/// salt and IV.  Prefer `encode` unless you need one of the options.
pub fn encode_with_options(
    secrets: &[Secret],
    kdf: &dyn Kdf,
    options: &EncodeOptions,
) -> Result<Block> {
    validate_secrets(secrets)?;

    let headers_length = match options.headers_length {
        Some(len) if len == 0 || len % LENGTH_INCREMENT != 0 => {
            return Err(BlockcryptError::InvalidHeadersLength)
        }
        Some(len) => len,
        None => DEFAULT_HEADERS_LENGTH,
    };

    // The first secret's frame fixes the data region size when none is
    // given: double its footprint, rounded up, leaves headroom for later
    // secrets without the final size revealing the secret count.
    let data_length = match options.data_length {
        Some(len) if len == 0 || len % LENGTH_INCREMENT != 0 => {
            return Err(BlockcryptError::InvalidDataLength)
        }
        Some(len) => len,
        None => round_up(
            (secrets[0].message.len() + FRAME_TRAILER_LENGTH) * 2,
            DATA_LENGTH_ROUNDING,
        ),
    };

    let salt = options.salt.unwrap_or_else(random_array);
    let iv = options.iv.unwrap_or_else(random_array);

    // Both regions grow strictly in input order; `data.len()` before each
    // append is the offset recorded in that secret's descriptor.
    let mut headers: Vec<u8> = Vec::with_capacity(headers_length);
    let mut data: Vec<u8> = Vec::with_capacity(data_length);

    for secret in secrets {
        let key = derive_block_key(kdf, &secret.passphrase, &salt)?;

        let secret_iv: [u8; GCM_IV_LENGTH] = random_array();
        let (ciphertext, tag) = encrypt_gcm(key.as_bytes(), &secret_iv, &secret.message)?;

        let offset = data.len();
        let ciphertext_length = ciphertext.len();

        data.extend_from_slice(&ciphertext);
        data.extend_from_slice(&secret_iv);
        data.extend_from_slice(&tag);

        // Descriptor records where the frame starts and how long the
        // ciphertext is, excluding the fixed IV/tag trailer.
        let descriptor = format!("{offset}:{ciphertext_length}");
        headers.extend_from_slice(&encrypt_cbc(key.as_bytes(), &iv, descriptor.as_bytes()));
    }

    if data.len() > data_length {
        return Err(BlockcryptError::DataTooLong);
    }
    if headers.len() > headers_length {
        return Err(BlockcryptError::HeadersTooLong);
    }

    // Pad both regions to their targets with CSPRNG noise, which is
    // indistinguishable from the ciphertext preceding it.
    data.extend_from_slice(&random_bytes(data_length - data.len()));
    headers.extend_from_slice(&random_bytes(headers_length - headers.len()));

    Ok(Block {
        salt,
        iv,
        headers,
        data,
    })
}
