//! Key generation helpers and key configuration.

use crate::aead::AeadCrypter;
use crate::error::{CryptoError, CryptoResult};
use base64::Engine;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

fn rand_key<const N: usize>() -> [u8; N] {
    let mut key = [0u8; N];
    rand_core::OsRng.fill_bytes(&mut key);
    key
}

/// Generate a random AES-128 key.
pub fn rand_key16() -> [u8; 16] {
    rand_key()
}

/// Generate a random AES-192 key.
pub fn rand_key24() -> [u8; 24] {
    rand_key()
}

/// Generate a random AES-256 key.
pub fn rand_key32() -> [u8; 32] {
    rand_key()
}

/// Token encryption key as carried in service configuration.
///
/// The key material lives in config as standard base64; decoded length must
/// be one of the accepted AES key sizes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Base64-encoded key (16, 24, or 32 bytes decoded).
    pub key_base64: String,
}

impl KeyConfig {
    /// Generate a fresh AES-256 key config.
    pub fn generate() -> Self {
        Self {
            key_base64: base64::engine::general_purpose::STANDARD.encode(rand_key32()),
        }
    }

    /// Decode the key and build the AEAD codec from it.
    pub fn build(&self) -> CryptoResult<AeadCrypter> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(&self.key_base64)
            .map_err(|e| CryptoError::KeyParsing(format!("invalid base64: {e}")))?;

        AeadCrypter::new(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aead::{Decrypter, Encrypter};

    #[test]
    fn test_rand_key_lengths() {
        assert_eq!(rand_key16().len(), 16);
        assert_eq!(rand_key24().len(), 24);
        assert_eq!(rand_key32().len(), 32);
    }

    #[test]
    fn test_rand_keys_differ() {
        assert_ne!(rand_key32(), rand_key32());
    }

    #[test]
    fn test_key_config_roundtrip() {
        let config = KeyConfig::generate();
        let crypter = config.build().unwrap();

        let token = crypter.encrypt(b"hello").unwrap();
        assert_eq!(crypter.decrypt(&token).unwrap(), b"hello");
    }

    #[test]
    fn test_key_config_invalid_base64() {
        let config = KeyConfig {
            key_base64: "!!!not base64!!!".to_string(),
        };
        assert!(matches!(
            config.build().unwrap_err(),
            CryptoError::KeyParsing(_)
        ));
    }

    #[test]
    fn test_key_config_wrong_length() {
        let config = KeyConfig {
            key_base64: base64::engine::general_purpose::STANDARD.encode([0u8; 20]),
        };
        assert!(matches!(
            config.build().unwrap_err(),
            CryptoError::InvalidKeySize(20)
        ));
    }
}
