//! Typed keyset payload.
//!
//! A payload is an ordered list of keyset values, each a `(path, value,
//! order)` triple. The only persistent representation of a value is its
//! canonical string encoding; typed accessors parse on demand, so the wire
//! format is invariant under caller type changes.

use crate::error::{Error, Result};
use crate::order::Order;
use num_complex::{Complex32, Complex64};
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A single keyset entry: column path, canonical string value, and the sort
/// direction the key is compared under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeysetValue {
    /// Column or field identifier, chosen by the caller.
    pub path: String,
    /// Canonical string encoding of the underlying typed value.
    pub value: String,
    /// Sort direction for this key.
    pub order: Order,
}

/// An ordered, immutable sequence of keyset values.
///
/// Insertion order defines lexicographic precedence when the payload is
/// expanded into a pagination predicate. Paths are not required to be unique;
/// the first occurrence wins on lookup. Payloads are produced by
/// [`KeysetPayloadBuilder`](crate::builder::KeysetPayloadBuilder) and never
/// mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeysetPayload {
    values: Vec<KeysetValue>,
}

impl KeysetPayload {
    pub(crate) fn from_values(values: Vec<KeysetValue>) -> Self {
        Self { values }
    }

    /// All entries in insertion order.
    pub fn values(&self) -> &[KeysetValue] {
        &self.values
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a single entry by path. First occurrence wins.
    fn value(&self, path: &str) -> Result<&KeysetValue> {
        self.values
            .iter()
            .find(|v| v.path == path)
            .ok_or_else(|| Error::FieldNotFound(path.to_string()))
    }

    /// Retrieve a value at `path`, converting the raw string to `T` with the
    /// supplied decode function.
    ///
    /// This is the extension point for caller-defined types; every built-in
    /// typed accessor is an instance of it. A missing path yields
    /// [`Error::FieldNotFound`]; a decode failure (syntax or range) yields
    /// [`Error::Decode`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let (id, order) = payload.get_with("id", uuid::Uuid::parse_str)?;
    /// ```
    pub fn get_with<T, D, E>(&self, path: &str, decode: D) -> Result<(T, Order)>
    where
        D: FnOnce(&str) -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        let entry = self.value(path)?;
        let decoded = decode(&entry.value).map_err(|e| Error::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok((decoded, entry.order))
    }

    // --- string ---

    /// Retrieve a string value verbatim.
    pub fn get_str(&self, path: &str) -> Result<(String, Order)> {
        self.get_with(path, |s| Ok::<_, std::convert::Infallible>(s.to_string()))
    }

    // --- bool ---

    /// Retrieve a bool; only `"true"` and `"false"` are accepted.
    pub fn get_bool(&self, path: &str) -> Result<(bool, Order)> {
        self.get_with(path, |s| s.parse::<bool>())
    }

    // --- signed integers ---

    pub fn get_i8(&self, path: &str) -> Result<(i8, Order)> {
        self.get_with(path, |s| s.parse::<i8>())
    }

    pub fn get_i16(&self, path: &str) -> Result<(i16, Order)> {
        self.get_with(path, |s| s.parse::<i16>())
    }

    pub fn get_i32(&self, path: &str) -> Result<(i32, Order)> {
        self.get_with(path, |s| s.parse::<i32>())
    }

    pub fn get_i64(&self, path: &str) -> Result<(i64, Order)> {
        self.get_with(path, |s| s.parse::<i64>())
    }

    pub fn get_i128(&self, path: &str) -> Result<(i128, Order)> {
        self.get_with(path, |s| s.parse::<i128>())
    }

    pub fn get_isize(&self, path: &str) -> Result<(isize, Order)> {
        self.get_with(path, |s| s.parse::<isize>())
    }

    // --- unsigned integers ---

    pub fn get_u8(&self, path: &str) -> Result<(u8, Order)> {
        self.get_with(path, |s| s.parse::<u8>())
    }

    pub fn get_u16(&self, path: &str) -> Result<(u16, Order)> {
        self.get_with(path, |s| s.parse::<u16>())
    }

    pub fn get_u32(&self, path: &str) -> Result<(u32, Order)> {
        self.get_with(path, |s| s.parse::<u32>())
    }

    pub fn get_u64(&self, path: &str) -> Result<(u64, Order)> {
        self.get_with(path, |s| s.parse::<u64>())
    }

    pub fn get_u128(&self, path: &str) -> Result<(u128, Order)> {
        self.get_with(path, |s| s.parse::<u128>())
    }

    pub fn get_usize(&self, path: &str) -> Result<(usize, Order)> {
        self.get_with(path, |s| s.parse::<usize>())
    }

    // --- aliases ---

    /// Alias accessor for `u8`.
    pub fn get_byte(&self, path: &str) -> Result<(u8, Order)> {
        self.get_u8(path)
    }

    /// Retrieve a char transported as its Unicode scalar value in decimal.
    pub fn get_char(&self, path: &str) -> Result<(char, Order)> {
        self.get_with(path, |s| {
            let scalar = s.parse::<u32>().map_err(|e| e.to_string())?;
            char::from_u32(scalar).ok_or_else(|| format!("invalid unicode scalar value: {scalar}"))
        })
    }

    // --- floating point ---

    pub fn get_f32(&self, path: &str) -> Result<(f32, Order)> {
        self.get_with(path, |s| s.parse::<f32>())
    }

    pub fn get_f64(&self, path: &str) -> Result<(f64, Order)> {
        self.get_with(path, |s| s.parse::<f64>())
    }

    // --- complex ---

    pub fn get_complex32(&self, path: &str) -> Result<(Complex32, Order)> {
        self.get_with(path, |s| s.parse::<Complex32>())
    }

    pub fn get_complex64(&self, path: &str) -> Result<(Complex64, Order)> {
        self.get_with(path, |s| s.parse::<Complex64>())
    }

    // --- time ---

    /// Retrieve a timestamp encoded as RFC 3339 with fractional seconds and
    /// explicit zone offset.
    pub fn get_time(&self, path: &str) -> Result<(OffsetDateTime, Order)> {
        self.get_with(path, |s| OffsetDateTime::parse(s, &Rfc3339))
    }
}
