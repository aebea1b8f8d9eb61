//! Keyset pagination predicates for relational backends.
//!
//! Expands a decoded keyset payload into the lexicographic comparison that
//! fetches the next page under mixed ascending/descending sort:
//! - [`keyset_predicate`] emits the abstract disjunction through a
//!   caller-provided expression factory
//! - [`keyset_where_order`] renders it as SQL with positional placeholders,
//!   decoding values through a per-path typed decoder registry
//! - [`bind_query`]/[`bind_query_as`] attach the decoded values to a SQLite
//!   query
//!
//! The comparison is strict, so callers fetch `page_size + 1` rows: a full
//! overflow row signals another page, and the last in-page row supplies the
//! next cursor payload.

pub mod error;
pub mod expr;
pub mod sql;
pub mod sqlite;

pub use error::{QueryError, QueryResult};
pub use expr::{CompareOp, KeysetPredicate, keyset_predicate};
pub use sql::{KeysetDecoders, KeysetSql, SqlValue, keyset_where_order};
pub use sqlite::{bind_query, bind_query_as};
