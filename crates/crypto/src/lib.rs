//! Authenticated encryption for opaque page tokens.
//!
//! This crate provides:
//! - The [`Encrypter`]/[`Decrypter`]/[`Crypter`] traits that the token layer
//!   consumes abstractly
//! - [`AeadCrypter`], the AES-GCM implementation (128/192/256-bit keys)
//! - Random key helpers and [`KeyConfig`] for keys carried in service config

pub mod aead;
pub mod error;
pub mod key;

pub use aead::{AeadCrypter, Crypter, Decrypter, Encrypter, NONCE_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{KeyConfig, rand_key16, rand_key24, rand_key32};
