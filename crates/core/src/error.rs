//! Error types for the page-token core.

use thiserror::Error;

/// Page-token error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("failed to decode field {path}: {reason}")]
    Decode { path: String, reason: String },

    // All decryption and deserialization failures collapse into this one
    // variant so clients cannot distinguish why a token was rejected.
    #[error("invalid page token")]
    InvalidToken,

    #[error("malformed page token: {0}")]
    MalformedToken(String),

    #[error("checksum mismatch (got 0x{got:08x} but expected 0x{expected:08x})")]
    ChecksumMismatch { got: u32, expected: u32 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("encryption error: {0}")]
    Crypto(#[from] pagetoken_crypto::CryptoError),
}

/// Result type alias for page-token operations.
pub type Result<T> = std::result::Result<T, Error>;
