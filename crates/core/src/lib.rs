//! Encrypted keyset page tokens for cursor-based pagination.
//!
//! This crate defines the canonical token model used across the workspace:
//! - Sort direction with a stable wire form
//! - Typed keyset payloads and their builder
//! - Request-parameter checksums that bind a token to its filters
//! - The opaque token codec (serialize, encrypt, parse, verify)
//! - The request-side reader that bootstraps or validates tokens
//!
//! A handler builds a payload from the last row of a page, wraps it in a
//! token bound to the request's checksum, and hands the opaque string to the
//! client. On the next request the reader decrypts the echoed string,
//! verifies the checksum against the recomputed one, and exposes the typed
//! payload for the query layer to turn into a keyset predicate.

pub mod builder;
pub mod checksum;
pub mod error;
pub mod order;
pub mod parser;
pub mod payload;
pub mod request;
pub mod token;
mod wire;

pub use builder::KeysetPayloadBuilder;
pub use checksum::{ChecksumBuilder, DEFAULT_CHECKSUM_MASK};
pub use error::{Error, Result};
pub use order::Order;
pub use parser::TokenParser;
pub use payload::{KeysetPayload, KeysetValue};
pub use request::{Request, TokenReader};
pub use token::KeysetToken;
