//! Opaque keyset page tokens.

use crate::error::Result;
use crate::payload::KeysetPayload;
use crate::wire;
use pagetoken_crypto::Crypter;
use std::fmt;
use std::sync::Arc;

/// A keyset page token: a payload of cursor values bound to the checksum of
/// the request parameters it was issued under.
///
/// The codec reference is a capability, not data; it is never serialized.
/// Tokens are lightweight value holders and safe to read concurrently.
#[derive(Clone)]
pub struct KeysetToken {
    checksum: u32,
    crypter: Arc<dyn Crypter>,
    payload: KeysetPayload,
}

impl KeysetToken {
    /// Create a token from its parts.
    pub fn new(crypter: Arc<dyn Crypter>, checksum: u32, payload: KeysetPayload) -> Self {
        Self {
            checksum,
            crypter,
            payload,
        }
    }

    /// The request-parameter checksum this token is bound to.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// The cursor payload.
    pub fn payload(&self) -> &KeysetPayload {
        &self.payload
    }

    /// Produce the token for the following page.
    ///
    /// The codec and checksum are inherited verbatim; only the payload is
    /// replaced. The checksum is never recomputed here, which is what keeps
    /// the token bound to the original request across pages.
    pub fn next(&self, payload: KeysetPayload) -> Self {
        Self {
            checksum: self.checksum,
            crypter: self.crypter.clone(),
            payload,
        }
    }

    /// Serialize and encrypt into the opaque external string.
    ///
    /// The plaintext is a flat JSON string array `[p0, v0, o0, ..., checksum]`
    /// with the checksum in decimal as the trailing element. The external
    /// form reveals nothing about field names, values, or count without the
    /// encryption key.
    pub fn stringify(&self) -> Result<String> {
        let values = self.payload.values();
        let mut parts = Vec::with_capacity(values.len() * 3 + 1);

        for v in values {
            parts.push(v.path.clone());
            parts.push(v.value.clone());
            parts.push(v.order.as_str().to_string());
        }
        parts.push(self.checksum.to_string());

        let plaintext = wire::encode_string_array(&parts)?;
        Ok(self.crypter.encrypt(&plaintext)?)
    }
}

impl fmt::Debug for KeysetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysetToken")
            .field("checksum", &format_args!("0x{:08x}", self.checksum))
            .field("fields", &self.payload.len())
            .finish()
    }
}
