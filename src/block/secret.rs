//! The Secret input type.
//!
//! Secrets are caller-owned and ephemeral: a slice of them goes into one
//! `encode` call and nothing about them is retained afterwards.

use crate::errors::{BlockcryptError, Result};

/// One message to protect, together with the passphrase that unlocks it.
#[derive(Clone)]
pub struct Secret {
    /// The plaintext to protect.  Must be non-empty.
    pub message: Vec<u8>,

    /// The passphrase this secret is recoverable with.  Must be non-empty.
    pub passphrase: String,
}

impl Secret {
    /// Create a new `Secret` from anything byte-like and anything
    /// string-like.
    pub fn new(message: impl Into<Vec<u8>>, passphrase: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            passphrase: passphrase.into(),
        }
    }
}

/// Check that the secrets list is usable: non-empty, and every entry has a
/// non-empty message and passphrase.
pub(crate) fn validate_secrets(secrets: &[Secret]) -> Result<()> {
    let valid = !secrets.is_empty()
        && secrets
            .iter()
            .all(|secret| !secret.message.is_empty() && !secret.passphrase.is_empty());
    if valid {
        Ok(())
    } else {
        Err(BlockcryptError::InvalidSecrets)
    }
}
