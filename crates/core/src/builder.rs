//! Keyset payload builder.

use crate::error::{Error, Result};
use crate::order::Order;
use crate::payload::{KeysetPayload, KeysetValue};
use num_complex::{Complex32, Complex64};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Append-only accumulator of keyset values.
///
/// Typed adders canonicalize their argument to a string at write time and
/// return the builder for chaining. Entries can only be appended; there is no
/// way to delete, edit, or reorder them. [`build`](Self::build) snapshots an
/// independent payload, so a builder can keep accumulating without affecting
/// payloads it already produced.
#[derive(Clone, Debug, Default)]
pub struct KeysetPayloadBuilder {
    values: Vec<KeysetValue>,
}

impl KeysetPayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Single internal write path; every typed adder funnels through here.
    fn push(mut self, path: String, value: String, order: Order) -> Self {
        self.values.push(KeysetValue { path, value, order });
        self
    }

    /// Produce an immutable payload from the values accumulated so far.
    pub fn build(&self) -> KeysetPayload {
        KeysetPayload::from_values(self.values.clone())
    }

    /// Append a value serialized with the supplied encode function.
    ///
    /// The inverse of [`KeysetPayload::get_with`]; built-in typed adders are
    /// instances of this.
    pub fn add_with<T, F>(self, path: impl Into<String>, value: T, order: Order, encode: F) -> Self
    where
        F: FnOnce(T) -> String,
    {
        self.push(path.into(), encode(value), order)
    }

    // --- string ---

    pub fn add_str(self, path: impl Into<String>, value: impl Into<String>, order: Order) -> Self {
        self.push(path.into(), value.into(), order)
    }

    // --- bool ---

    pub fn add_bool(self, path: impl Into<String>, value: bool, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    // --- signed integers ---

    pub fn add_i8(self, path: impl Into<String>, value: i8, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_i16(self, path: impl Into<String>, value: i16, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_i32(self, path: impl Into<String>, value: i32, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_i64(self, path: impl Into<String>, value: i64, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_i128(self, path: impl Into<String>, value: i128, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_isize(self, path: impl Into<String>, value: isize, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    // --- unsigned integers ---

    pub fn add_u8(self, path: impl Into<String>, value: u8, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_u16(self, path: impl Into<String>, value: u16, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_u32(self, path: impl Into<String>, value: u32, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_u64(self, path: impl Into<String>, value: u64, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_u128(self, path: impl Into<String>, value: u128, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_usize(self, path: impl Into<String>, value: usize, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    // --- aliases ---

    /// Alias adder for `u8`.
    pub fn add_byte(self, path: impl Into<String>, value: u8, order: Order) -> Self {
        self.add_u8(path, value, order)
    }

    /// Append a char transported as its Unicode scalar value in decimal.
    pub fn add_char(self, path: impl Into<String>, value: char, order: Order) -> Self {
        self.push(path.into(), (value as u32).to_string(), order)
    }

    // --- floating point ---

    pub fn add_f32(self, path: impl Into<String>, value: f32, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_f64(self, path: impl Into<String>, value: f64, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    // --- complex ---

    pub fn add_complex32(self, path: impl Into<String>, value: Complex32, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    pub fn add_complex64(self, path: impl Into<String>, value: Complex64, order: Order) -> Self {
        self.push(path.into(), value.to_string(), order)
    }

    // --- time ---

    /// Append a timestamp encoded as RFC 3339 with fractional seconds and
    /// explicit zone offset.
    ///
    /// Fails only if the timestamp cannot be represented in RFC 3339 (a year
    /// outside 0..=9999).
    pub fn add_time(
        self,
        path: impl Into<String>,
        value: OffsetDateTime,
        order: Order,
    ) -> Result<Self> {
        let encoded = value
            .format(&Rfc3339)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(self.push(path.into(), encoded, order))
    }
}
