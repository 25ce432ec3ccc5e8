//! Block decoder and header search.
//!
//! A block carries no index, so the decoder finds a secret's descriptor by
//! brute force: derive one candidate key from the passphrase, then
//! trial-decrypt every byte range of the header region with it until one
//! decrypts to a plaintext shaped like `"<offset>:<length>"`.  Under the
//! matching key exactly one range does; under any other key the trials
//! decrypt to noise that essentially never matches the pattern, which is
//! what makes a wrong passphrase indistinguishable from a corrupted block.

use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Block, CBC_IV_LENGTH, FRAME_TRAILER_LENGTH, GCM_IV_LENGTH};
use crate::crypto::{decrypt_cbc, decrypt_gcm, derive_block_key, DerivedKey, Kdf};
use crate::errors::{BlockcryptError, Result};

/// Structural shape of a decrypted descriptor.
static HEADER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn header_pattern() -> &'static Regex {
    HEADER_PATTERN.get_or_init(|| Regex::new(r"^[0-9]+:[0-9]+$").expect("hardcoded pattern"))
}

/// Recover the one message `passphrase` unlocks from `block`.
///
/// Fails with `HeaderNotFound` if the header search exhausts without a
/// structurally valid descriptor — a wrong passphrase and a corrupted block
/// are indistinguishable here by design.  `DecryptionFailed` afterwards is
/// anomalous (the descriptor and the frame were produced under the same
/// key) and indicates data corruption.
pub fn decode(passphrase: &str, block: &Block, kdf: &dyn Kdf) -> Result<Vec<u8>> {
    let key = derive_block_key(kdf, passphrase, &block.salt)?;

    let (offset, length) = find_header(&key, &block.iv, &block.headers)
        .ok_or(BlockcryptError::HeaderNotFound)?;

    read_frame(&key, &block.data, offset, length)
}

/// Exhaustive search over all `(start, end)` byte ranges of the header
/// region: `start` ascending, `end` descending, first match accepted.
///
/// The enumeration order is part of the format contract, not a free
/// implementation choice — existing blocks rely on first-match under
/// exactly this order.
fn find_header(
    key: &DerivedKey,
    iv: &[u8; CBC_IV_LENGTH],
    headers: &[u8],
) -> Option<(usize, usize)> {
    for start in 0..headers.len() {
        for end in ((start + 1)..=headers.len()).rev() {
            if let Some(descriptor) = try_header_range(key, iv, &headers[start..end]) {
                return Some(descriptor);
            }
        }
    }
    None
}

/// Trial-decrypt one candidate byte range.
///
/// Every failure mode — misaligned slice, invalid padding, non-UTF-8
/// plaintext, pattern mismatch, numeric overflow — means "not this range"
/// and is swallowed, never logged or propagated.
fn try_header_range(
    key: &DerivedKey,
    iv: &[u8; CBC_IV_LENGTH],
    candidate: &[u8],
) -> Option<(usize, usize)> {
    let plaintext = decrypt_cbc(key.as_bytes(), iv, candidate).ok()?;
    let descriptor = std::str::from_utf8(&plaintext).ok()?;
    if !header_pattern().is_match(descriptor) {
        return None;
    }
    let (offset, length) = descriptor.split_once(':')?;
    Some((offset.parse().ok()?, length.parse().ok()?))
}

/// Slice one frame out of the data region and AEAD-decrypt it.
///
/// Layout: `data[offset..offset+length]` is the ciphertext, followed by the
/// 12-byte per-secret IV and the 16-byte auth tag.
fn read_frame(key: &DerivedKey, data: &[u8], offset: usize, length: usize) -> Result<Vec<u8>> {
    let ciphertext_end = offset
        .checked_add(length)
        .ok_or(BlockcryptError::DecryptionFailed)?;
    let frame_end = ciphertext_end
        .checked_add(FRAME_TRAILER_LENGTH)
        .ok_or(BlockcryptError::DecryptionFailed)?;
    if frame_end > data.len() {
        return Err(BlockcryptError::DecryptionFailed);
    }

    let ciphertext = &data[offset..ciphertext_end];
    let iv: [u8; GCM_IV_LENGTH] = data[ciphertext_end..ciphertext_end + GCM_IV_LENGTH]
        .try_into()
        .map_err(|_| BlockcryptError::DecryptionFailed)?;
    let tag = &data[ciphertext_end + GCM_IV_LENGTH..frame_end];

    decrypt_gcm(key.as_bytes(), &iv, ciphertext, tag)
}
