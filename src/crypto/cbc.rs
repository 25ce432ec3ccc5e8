//! AES-256-CBC with PKCS#7 padding for the header region.
//!
//! Every header entry in a block is CBC-encrypted under its secret's
//! derived key and the block-level 16-byte IV.  Decryption failure is an
//! expected, frequent event here: the decoder's header search trial-decrypts
//! arbitrary byte ranges and relies on misaligned slices and invalid
//! padding being rejected cleanly.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::block::CBC_IV_LENGTH;
use crate::errors::{BlockcryptError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` with a 32-byte `key` and a 16-byte `iv`.
///
/// The output length is `plaintext.len()` rounded up to the next multiple
/// of 16 (PKCS#7 always adds at least one padding byte).
pub fn encrypt_cbc(key: &[u8; 32], iv: &[u8; CBC_IV_LENGTH], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt data that was produced by `encrypt_cbc`.
///
/// Fails with `DecryptionFailed` if the ciphertext length is not a multiple
/// of the cipher block size or the padding does not unpad to a valid
/// PKCS#7 structure.
pub fn decrypt_cbc(
    key: &[u8; 32],
    iv: &[u8; CBC_IV_LENGTH],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| BlockcryptError::DecryptionFailed)
}
