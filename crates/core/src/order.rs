//! Sort direction for keyset entries.

use crate::error::{Error, Result};
use std::fmt;

/// Sort direction of a keyset entry.
///
/// The wire form is a single character: `"1"` for ascending, `"0"` for
/// descending. Parsing is strict; any other input is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    /// Parse from the wire form.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Self::Asc),
            "0" => Ok(Self::Desc),
            _ => Err(Error::InvalidOrder(s.to_string())),
        }
    }

    /// Get the wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "1",
            Self::Desc => "0",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
