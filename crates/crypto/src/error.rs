//! Crypto error types.

use thiserror::Error;

/// Errors raised by the AEAD codec and key handling.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key size: {0} bytes (must be 16, 24, or 32)")]
    InvalidKeySize(usize),

    #[error("key parsing error: {0}")]
    KeyParsing(String),

    #[error("failed to decode token: {0}")]
    DecodeFailed(String),

    #[error("ciphertext too short")]
    CiphertextTooShort,

    // Deliberately carries no detail: authentication failures must be
    // indistinguishable from one another.
    #[error("failed to decrypt token")]
    DecryptFailed,

    #[error("failed to encrypt token")]
    EncryptFailed,
}

/// Result type alias for crypto operations.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;
