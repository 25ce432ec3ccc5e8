//! Cryptographically secure random bytes.
//!
//! All randomness in a block — salt, block IV, per-secret IVs, and the
//! noise that pads both regions — comes from the OS CSPRNG.  Padding in
//! particular must be indistinguishable from ciphertext, so nothing weaker
//! than `OsRng` is acceptable here.

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate `len` cryptographically random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a fixed-size array of cryptographically random bytes.
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
