//! Token parsing.

use crate::error::{Error, Result};
use crate::order::Order;
use crate::payload::{KeysetPayload, KeysetValue};
use crate::token::KeysetToken;
use pagetoken_crypto::Crypter;
use std::sync::Arc;

/// Decrypts and validates keyset page tokens.
pub struct TokenParser {
    crypter: Arc<dyn Crypter>,
}

impl TokenParser {
    pub fn new(crypter: Arc<dyn Crypter>) -> Self {
        Self { crypter }
    }

    /// Parse a token string, verifying it against the checksum recomputed
    /// from the incoming request.
    ///
    /// Decryption and JSON failures all collapse into [`Error::InvalidToken`];
    /// structural deviations (element count, checksum range) are
    /// [`Error::MalformedToken`]; a checksum that fails to match
    /// `expected_checksum` is [`Error::ChecksumMismatch`], the sentinel for
    /// filter or sort tampering between pages.
    pub fn parse(&self, token: &str, expected_checksum: u32) -> Result<KeysetToken> {
        let plaintext = self
            .crypter
            .decrypt(token)
            .map_err(|_| Error::InvalidToken)?;

        let parts: Vec<String> =
            serde_json::from_slice(&plaintext).map_err(|_| Error::InvalidToken)?;

        if parts.is_empty() || (parts.len() - 1) % 3 != 0 {
            return Err(Error::MalformedToken(format!(
                "invalid element count: {}",
                parts.len()
            )));
        }

        let trailing = &parts[parts.len() - 1];
        let checksum = trailing
            .parse::<u32>()
            .map_err(|_| Error::MalformedToken(format!("invalid checksum: {trailing}")))?;

        let mut values = Vec::with_capacity((parts.len() - 1) / 3);
        for triple in parts[..parts.len() - 1].chunks_exact(3) {
            values.push(KeysetValue {
                path: triple[0].clone(),
                value: triple[1].clone(),
                order: Order::parse(&triple[2])?,
            });
        }

        if checksum != expected_checksum {
            return Err(Error::ChecksumMismatch {
                got: checksum,
                expected: expected_checksum,
            });
        }

        Ok(KeysetToken::new(
            self.crypter.clone(),
            checksum,
            KeysetPayload::from_values(values),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::KeysetPayloadBuilder;
    use pagetoken_crypto::{AeadCrypter, Encrypter, rand_key32};

    fn crypter() -> Arc<AeadCrypter> {
        Arc::new(AeadCrypter::new(&rand_key32()).unwrap())
    }

    fn encrypt_json(crypter: &AeadCrypter, json: &str) -> String {
        let mut bytes = json.as_bytes().to_vec();
        bytes.push(b'\n');
        crypter.encrypt(&bytes).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let crypter = crypter();
        let payload = KeysetPayloadBuilder::new()
            .add_str("id", "u1", Order::Asc)
            .add_str("score", "80", Order::Desc)
            .build();
        let token = KeysetToken::new(crypter.clone(), 0xDEAD_BEEF, payload.clone());

        let parsed = TokenParser::new(crypter)
            .parse(&token.stringify().unwrap(), 0xDEAD_BEEF)
            .unwrap();

        assert_eq!(parsed.checksum(), 0xDEAD_BEEF);
        assert_eq!(parsed.payload(), &payload);
    }

    #[test]
    fn test_garbage_token() {
        let err = TokenParser::new(crypter())
            .parse("definitely-not-a-token", 0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidToken));
    }

    #[test]
    fn test_non_array_plaintext() {
        let crypter = crypter();
        let token = encrypt_json(&crypter, r#"{"a":1}"#);
        let err = TokenParser::new(crypter).parse(&token, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidToken));
    }

    #[test]
    fn test_non_string_elements() {
        let crypter = crypter();
        let token = encrypt_json(&crypter, "[1,2,3,4]");
        let err = TokenParser::new(crypter).parse(&token, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidToken));
    }

    #[test]
    fn test_bad_element_count() {
        let crypter = crypter();
        // Two leading elements cannot form triples.
        let token = encrypt_json(&crypter, r#"["a","b","42"]"#);
        let err = TokenParser::new(crypter).parse(&token, 42).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn test_empty_array() {
        let crypter = crypter();
        let token = encrypt_json(&crypter, "[]");
        let err = TokenParser::new(crypter).parse(&token, 0).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn test_checksum_out_of_range() {
        let crypter = crypter();
        // One past u32::MAX.
        let token = encrypt_json(&crypter, r#"["4294967296"]"#);
        let err = TokenParser::new(crypter).parse(&token, 0).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn test_checksum_not_a_number() {
        let crypter = crypter();
        let token = encrypt_json(&crypter, r#"["id","u1","1","0xabc"]"#);
        let err = TokenParser::new(crypter).parse(&token, 0).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn test_invalid_order() {
        let crypter = crypter();
        let token = encrypt_json(&crypter, r#"["id","u1","2","42"]"#);
        let err = TokenParser::new(crypter).parse(&token, 42).unwrap_err();
        assert!(matches!(err, Error::InvalidOrder(_)));
    }

    #[test]
    fn test_checksum_mismatch() {
        let crypter = crypter();
        let token = KeysetToken::new(crypter.clone(), 100, KeysetPayload::default())
            .stringify()
            .unwrap();
        let err = TokenParser::new(crypter).parse(&token, 200).unwrap_err();
        assert!(matches!(
            err,
            Error::ChecksumMismatch {
                got: 100,
                expected: 200
            }
        ));
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let crypter = crypter();
        let token = KeysetToken::new(crypter.clone(), 7, KeysetPayload::default())
            .stringify()
            .unwrap();
        let parsed = TokenParser::new(crypter).parse(&token, 7).unwrap();
        assert!(parsed.payload().is_empty());
    }
}
