//! Caller-supplied key derivation capability.
//!
//! Blockcrypt never chooses or hardens a KDF itself — the caller provides
//! one (Argon2id, scrypt, a hardware-backed derivation, ...) and the codec
//! invokes it once per secret.  The salt is handed over hex-encoded so the
//! KDF sees a stable string regardless of how it hashes internally.
//!
//! The derived key must be exactly 32 bytes (AES-256).

use zeroize::Zeroize;

use crate::errors::Result;

/// Length of a derived key in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// A key derivation function supplied by the caller.
///
/// Must be deterministic for identical `(passphrase, salt)` inputs.  The
/// `salt` parameter is the hex encoding of the block's raw salt bytes.
///
/// Implemented for any `Fn(&str, &str) -> Result<[u8; 32]>`, so a plain
/// function or closure works.
pub trait Kdf {
    /// Derive a 32-byte key from a passphrase and a hex-encoded salt.
    fn derive_key(&self, passphrase: &str, salt: &str) -> Result<[u8; KEY_LENGTH]>;
}

impl<F> Kdf for F
where
    F: Fn(&str, &str) -> Result<[u8; KEY_LENGTH]>,
{
    fn derive_key(&self, passphrase: &str, salt: &str) -> Result<[u8; KEY_LENGTH]> {
        self(passphrase, salt)
    }
}

/// A wrapper around a 32-byte derived key that automatically zeroes
/// its memory when dropped.
///
/// Derived keys are transient by design: one is produced per secret during
/// encode and exactly one per decode attempt, and none is ever stored.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.bytes
    }
}

/// Derive the key for one secret: run the caller's KDF over the passphrase
/// and the hex encoding of the block salt.
pub fn derive_block_key(kdf: &dyn Kdf, passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
    let key = kdf.derive_key(passphrase, &hex::encode(salt))?;
    Ok(DerivedKey::new(key))
}
