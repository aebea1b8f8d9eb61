//! Request-parameter checksums.
//!
//! A checksum fingerprints the non-cursor request parameters (filters, sort
//! expression, page size) that define a pagination's identity. It is stored
//! inside the token at issuance and re-derived from the incoming request on
//! every page, so a client that mutates filters mid-pagination is caught by
//! the mismatch.

use crate::error::Result;
use crate::wire;

/// Default XOR mask applied to the CRC-32 fingerprint.
pub const DEFAULT_CHECKSUM_MASK: u32 = 0x58AE_F322;

fn checksum(data: &[u8], mask: u32) -> u32 {
    crc32fast::hash(data) ^ mask
}

/// Accumulates an ordered list of (key, value) pairs and fingerprints them.
///
/// The accumulated pairs are flattened to `[k0, v0, k1, v1, ...]`, serialized
/// as a JSON string array, hashed with CRC-32 (IEEE), and XORed with the
/// mask. Pair order is significant; two builders fed the same pairs in a
/// different order produce different checksums.
#[derive(Clone, Debug)]
pub struct ChecksumBuilder {
    mask: u32,
    fields: Vec<String>,
}

impl ChecksumBuilder {
    /// Create a builder with the default mask.
    pub fn new() -> Self {
        Self {
            mask: DEFAULT_CHECKSUM_MASK,
            fields: Vec::new(),
        }
    }

    /// Override the XOR mask.
    pub fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Append a (key, value) pair.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(key.into());
        self.fields.push(value.into());
        self
    }

    /// Compute the checksum over the pairs accumulated so far.
    pub fn build(&self) -> Result<u32> {
        let bytes = wire::encode_string_array(&self.fields)?;
        Ok(checksum(&bytes, self.mask))
    }
}

impl Default for ChecksumBuilder {
    fn default() -> Self {
        Self::new()
    }
}
