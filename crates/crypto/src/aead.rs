//! AES-GCM token encryption.
//!
//! Tokens are framed as `base64url(nonce || ciphertext || tag)` with a fresh
//! random 96-bit nonce per encryption. The key length selects the AES variant.

use crate::error::{CryptoError, CryptoResult};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{AeadCore, Aes128Gcm, Aes256Gcm, AesGcm, KeyInit, Nonce};
use base64::Engine;
use std::fmt;

/// AES-192-GCM with the standard 96-bit nonce.
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Nonce size in bytes. All supported variants use 96-bit nonces.
pub const NONCE_SIZE: usize = 12;

/// Something that can seal byte blobs into opaque token strings.
pub trait Encrypter {
    /// Encrypt plaintext bytes into an opaque, URL-safe token string.
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<String>;
}

/// Something that can open token strings produced by an [`Encrypter`].
pub trait Decrypter {
    /// Decrypt a token string back into the original plaintext bytes.
    fn decrypt(&self, token: &str) -> CryptoResult<Vec<u8>>;
}

/// Combined encrypt/decrypt capability, shareable across requests.
///
/// Callers may substitute any authenticated construction that upholds the
/// same tamper-evidence contract as the AES-GCM implementation.
pub trait Crypter: Encrypter + Decrypter + Send + Sync {}

impl<T: Encrypter + Decrypter + Send + Sync> Crypter for T {}

enum AeadCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// AEAD codec over AES-GCM.
///
/// Construction is one-shot; the codec is immutable afterwards and safe to
/// share across threads.
pub struct AeadCrypter {
    cipher: AeadCipher,
}

impl AeadCrypter {
    /// Create a codec from a raw key.
    ///
    /// The key must be 16, 24, or 32 bytes, selecting AES-128, AES-192, or
    /// AES-256 respectively.
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map(AeadCipher::Aes128)
                .map_err(|_| CryptoError::InvalidKeySize(key.len()))?,
            24 => Aes192Gcm::new_from_slice(key)
                .map(AeadCipher::Aes192)
                .map_err(|_| CryptoError::InvalidKeySize(key.len()))?,
            32 => Aes256Gcm::new_from_slice(key)
                .map(AeadCipher::Aes256)
                .map_err(|_| CryptoError::InvalidKeySize(key.len()))?,
            n => return Err(CryptoError::InvalidKeySize(n)),
        };

        Ok(Self { cipher })
    }

    /// Name of the underlying AEAD algorithm.
    pub fn algorithm(&self) -> &'static str {
        match self.cipher {
            AeadCipher::Aes128(_) => "AES-128-GCM",
            AeadCipher::Aes192(_) => "AES-192-GCM",
            AeadCipher::Aes256(_) => "AES-256-GCM",
        }
    }
}

impl Encrypter for AeadCrypter {
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = match &self.cipher {
            AeadCipher::Aes128(c) => c.encrypt(&nonce, plaintext),
            AeadCipher::Aes192(c) => c.encrypt(&nonce, plaintext),
            AeadCipher::Aes256(c) => c.encrypt(&nonce, plaintext),
        }
        .map_err(|_| CryptoError::EncryptFailed)?;

        // Layout: nonce || ciphertext || tag
        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);

        Ok(base64::engine::general_purpose::URL_SAFE.encode(out))
    }
}

impl Decrypter for AeadCrypter {
    fn decrypt(&self, token: &str) -> CryptoResult<Vec<u8>> {
        let data = base64::engine::general_purpose::URL_SAFE
            .decode(token)
            .map_err(|e| CryptoError::DecodeFailed(e.to_string()))?;

        if data.len() < NONCE_SIZE {
            return Err(CryptoError::CiphertextTooShort);
        }

        let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
        let nonce: &Nonce<U12> = Nonce::from_slice(nonce);

        match &self.cipher {
            AeadCipher::Aes128(c) => c.decrypt(nonce, ciphertext),
            AeadCipher::Aes192(c) => c.decrypt(nonce, ciphertext),
            AeadCipher::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|_| CryptoError::DecryptFailed)
    }
}

impl fmt::Debug for AeadCrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key must never leak through Debug output.
        write!(f, "AeadCrypter({})", self.algorithm())
    }
}
