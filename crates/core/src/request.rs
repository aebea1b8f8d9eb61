//! Request-side token reading.

use crate::checksum::{ChecksumBuilder, DEFAULT_CHECKSUM_MASK};
use crate::error::{Error, Result};
use crate::parser::TokenParser;
use crate::payload::KeysetPayload;
use crate::token::KeysetToken;
use pagetoken_crypto::Crypter;
use std::sync::Arc;

/// The narrow capability a listing request must expose to the token layer.
pub trait Request {
    /// The opaque page token echoed by the client; empty on the first page.
    fn page_token(&self) -> &str;

    /// The filter/sort parameters that define this pagination's identity, in
    /// a stable order.
    fn checksum_fields(&self) -> Vec<(String, String)>;
}

/// Extracts and validates keyset tokens from listing requests.
///
/// The reader recomputes the request-parameter checksum on every call and
/// verifies it against the one embedded in the token, so any drift in
/// filters, sort expression, or page size between pages is rejected.
pub struct TokenReader {
    crypter: Arc<dyn Crypter>,
    mask: u32,
    extra_fields: Vec<(String, String)>,
}

impl TokenReader {
    pub fn new(crypter: Arc<dyn Crypter>) -> Self {
        Self {
            crypter,
            mask: DEFAULT_CHECKSUM_MASK,
            extra_fields: Vec::new(),
        }
    }

    /// Override the checksum mask.
    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Add a statically-configured checksum field.
    ///
    /// Extra fields are hashed before the request's own fields, in the order
    /// they were added.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.push((key.into(), value.into()));
        self
    }

    /// Read the keyset token carried by `request`.
    ///
    /// An empty page-token string is not an error: it yields a fresh token
    /// with an empty payload, bound to the request's checksum, ready to
    /// bootstrap the first page.
    pub fn read(&self, request: &impl Request) -> Result<KeysetToken> {
        let mut builder = ChecksumBuilder::new().with_mask(self.mask);
        for (key, value) in &self.extra_fields {
            builder = builder.field(key.clone(), value.clone());
        }
        for (key, value) in request.checksum_fields() {
            builder = builder.field(key, value);
        }
        let expected = builder.build()?;

        let token = request.page_token();
        if token.is_empty() {
            return Ok(KeysetToken::new(
                self.crypter.clone(),
                expected,
                KeysetPayload::default(),
            ));
        }

        match TokenParser::new(self.crypter.clone()).parse(token, expected) {
            Err(Error::ChecksumMismatch { got, expected }) => {
                // Observed and expected values go to server-side logs only;
                // the client-facing error body must stay generic.
                let got_hex = format!("0x{got:08x}");
                let expected_hex = format!("0x{expected:08x}");
                tracing::warn!(
                    got = %got_hex,
                    expected = %expected_hex,
                    "page token checksum mismatch"
                );
                Err(Error::ChecksumMismatch { got, expected })
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::KeysetPayloadBuilder;
    use crate::order::Order;
    use pagetoken_crypto::{AeadCrypter, rand_key32};

    struct TestRequest {
        token: String,
        fields: Vec<(String, String)>,
    }

    impl Request for TestRequest {
        fn page_token(&self) -> &str {
            &self.token
        }

        fn checksum_fields(&self) -> Vec<(String, String)> {
            self.fields.clone()
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn crypter() -> Arc<dyn Crypter> {
        Arc::new(AeadCrypter::new(&rand_key32()).unwrap())
    }

    #[test]
    fn test_empty_token_bootstraps() {
        let request = TestRequest {
            token: String::new(),
            fields: fields(&[("status", "active"), ("limit", "10")]),
        };

        let token = TokenReader::new(crypter()).read(&request).unwrap();
        assert!(token.payload().is_empty());

        let expected = ChecksumBuilder::new()
            .field("status", "active")
            .field("limit", "10")
            .build()
            .unwrap();
        assert_eq!(token.checksum(), expected);
    }

    #[test]
    fn test_roundtrip_through_request() {
        let crypter = crypter();
        let reader = TokenReader::new(crypter.clone());

        let first = TestRequest {
            token: String::new(),
            fields: fields(&[("status", "active")]),
        };
        let token = reader.read(&first).unwrap();

        let payload = KeysetPayloadBuilder::new()
            .add_str("id", "u5", Order::Asc)
            .build();
        let echoed = token.next(payload.clone()).stringify().unwrap();

        let second = TestRequest {
            token: echoed,
            fields: fields(&[("status", "active")]),
        };
        let token = reader.read(&second).unwrap();
        assert_eq!(token.payload(), &payload);
    }

    #[test]
    fn test_filter_drift_is_rejected() {
        let crypter = crypter();
        let reader = TokenReader::new(crypter.clone());

        let first = TestRequest {
            token: String::new(),
            fields: fields(&[("status", "active")]),
        };
        let echoed = reader.read(&first).unwrap().stringify().unwrap();

        let second = TestRequest {
            token: echoed,
            fields: fields(&[("status", "inactive")]),
        };
        let err = reader.read(&second).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_extra_fields_precede_request_fields() {
        let request = TestRequest {
            token: String::new(),
            fields: fields(&[("status", "active")]),
        };

        let token = TokenReader::new(crypter())
            .with_field("api_version", "v2")
            .read(&request)
            .unwrap();

        let expected = ChecksumBuilder::new()
            .field("api_version", "v2")
            .field("status", "active")
            .build()
            .unwrap();
        assert_eq!(token.checksum(), expected);
    }

    #[test]
    fn test_custom_mask() {
        let request = TestRequest {
            token: String::new(),
            fields: fields(&[("q", "books")]),
        };

        let default_mask = TokenReader::new(crypter()).read(&request).unwrap();
        let custom_mask = TokenReader::new(crypter())
            .with_mask(0x0101_0101)
            .read(&request)
            .unwrap();
        assert_ne!(default_mask.checksum(), custom_mask.checksum());
    }
}
