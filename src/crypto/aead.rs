//! AES-256-GCM authenticated encryption for the data region.
//!
//! Unlike the usual nonce-prepended layout, the block format stores each
//! frame as `ciphertext || iv || tag`, so the IV is caller-supplied and
//! the 16-byte auth tag is split off the ciphertext explicitly.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::block::{GCM_IV_LENGTH, GCM_TAG_LENGTH};
use crate::errors::{BlockcryptError, Result};

/// Encrypt `plaintext` with a 32-byte `key` and a 12-byte `iv`.
///
/// Returns `(ciphertext, tag)` where `ciphertext.len() == plaintext.len()`
/// and `tag` is the 16-byte authentication tag.
pub fn encrypt_gcm(
    key: &[u8; 32],
    iv: &[u8; GCM_IV_LENGTH],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| BlockcryptError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Nonce::from_slice(iv);

    // `aes-gcm` appends the tag to the ciphertext; split it back out.
    let mut ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| BlockcryptError::EncryptionFailed(format!("encryption error: {e}")))?;
    let tag = ciphertext.split_off(ciphertext.len() - GCM_TAG_LENGTH);

    Ok((ciphertext, tag))
}

/// Decrypt a `(ciphertext, tag)` pair produced by `encrypt_gcm`.
///
/// Fails with `DecryptionFailed` if the authentication tag does not verify.
pub fn decrypt_gcm(
    key: &[u8; 32],
    iv: &[u8; GCM_IV_LENGTH],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| BlockcryptError::DecryptionFailed)?;

    let nonce = Nonce::from_slice(iv);

    // Reassemble the ciphertext || tag layout the cipher expects.
    let mut buf = Vec::with_capacity(ciphertext.len() + tag.len());
    buf.extend_from_slice(ciphertext);
    buf.extend_from_slice(tag);

    cipher
        .decrypt(nonce, buf.as_slice())
        .map_err(|_| BlockcryptError::DecryptionFailed)
}
