//! JSON wire form shared by the checksum and token codecs.

use crate::error::{Error, Result};

/// Serialize a flat list of strings as a compact JSON array followed by a
/// single newline byte.
///
/// The trailing newline is part of the wire form: checksums are computed over
/// these exact bytes, so the choice is fixed and must never change.
pub(crate) fn encode_string_array(parts: &[String]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(parts).map_err(|e| Error::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}
