use thiserror::Error;

/// All errors that can occur in Blockcrypt.
#[derive(Debug, Error)]
pub enum BlockcryptError {
    // --- Encode validation errors ---
    #[error("Invalid secrets")]
    InvalidSecrets,

    #[error("Invalid headers length")]
    InvalidHeadersLength,

    #[error("Invalid data length")]
    InvalidDataLength,

    #[error("Headers too long for headers length")]
    HeadersTooLong,

    #[error("Data too long for data length")]
    DataTooLong,

    // --- Decode errors ---
    #[error("Header not found")]
    HeaderNotFound,

    #[error("Decryption failed — wrong passphrase or corrupted block")]
    DecryptionFailed,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Serialization errors ---
    #[error("Invalid block format: {0}")]
    InvalidBlockFormat(String),
}

/// Convenience type alias for Blockcrypt results.
pub type Result<T> = std::result::Result<T, BlockcryptError>;
