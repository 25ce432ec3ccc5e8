//! Cryptographic primitives for Blockcrypt.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption for data frames (`aead`)
//! - AES-256-CBC encryption and decryption for header entries (`cbc`)
//! - The caller-supplied key derivation capability (`kdf`)
//! - CSPRNG helpers (`random`)

pub mod aead;
pub mod cbc;
pub mod kdf;
pub mod random;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_gcm, decrypt_cbc, derive_block_key, ...};
pub use aead::{decrypt_gcm, encrypt_gcm};
pub use cbc::{decrypt_cbc, encrypt_cbc};
pub use kdf::{derive_block_key, DerivedKey, Kdf, KEY_LENGTH};
pub use random::{random_array, random_bytes};
