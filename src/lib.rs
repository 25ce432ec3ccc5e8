//! Blockcrypt: deniable encryption of one or more secrets into a single
//! fixed-size opaque block.
//!
//! Each secret is protected by its own passphrase.  Without a passphrase an
//! observer cannot determine how many secrets a block holds, where they sit,
//! or whether any given region is ciphertext or random noise.

pub mod block;
pub mod crypto;
pub mod errors;

// Re-export the public API at the crate root so callers can write:
//   use blockcrypt::{encode, decode, Secret, Kdf};
pub use block::{
    decode, encode, encode_with_options, estimate_data_length, Block, EncodeOptions, Secret,
};
pub use crypto::kdf::{Kdf, KEY_LENGTH};
pub use errors::{BlockcryptError, Result};
