//! SQL rendering of keyset predicates.
//!
//! Maps payload paths to typed bind values through a decoder registry and
//! renders the expanded predicate as a WHERE clause with positional
//! placeholders plus the matching ORDER BY expression.

use crate::error::{QueryError, QueryResult};
use crate::expr::{CompareOp, keyset_predicate};
use pagetoken_core::{KeysetPayload, Order};
use std::collections::HashMap;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// A typed value ready to be bound to a backend query.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Timestamp(OffsetDateTime),
    Uuid(Uuid),
}

type DecodeFn = Box<dyn Fn(&str) -> Result<SqlValue, String> + Send + Sync>;

/// Registry mapping payload paths to typed decoders.
///
/// Each decoder converts the canonical string stored in the payload back to
/// the backend's native type. Built-in constructors cover the common column
/// types; [`with_decoder`](Self::with_decoder) registers caller-defined ones.
#[derive(Default)]
pub struct KeysetDecoders {
    decoders: HashMap<String, DecodeFn>,
}

impl KeysetDecoders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom decoder for `path`. The error string becomes the
    /// reason of the resulting [`QueryError::Decode`].
    pub fn with_decoder(
        mut self,
        path: impl Into<String>,
        decode: impl Fn(&str) -> Result<SqlValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.decoders.insert(path.into(), Box::new(decode));
        self
    }

    /// Pass the stored string through verbatim.
    pub fn text(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| Ok(SqlValue::Text(raw.to_string())))
    }

    pub fn integer(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| {
            raw.parse::<i64>()
                .map(SqlValue::Integer)
                .map_err(|e| e.to_string())
        })
    }

    pub fn real(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| {
            raw.parse::<f64>()
                .map(SqlValue::Real)
                .map_err(|e| e.to_string())
        })
    }

    pub fn boolean(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| {
            raw.parse::<bool>()
                .map(SqlValue::Boolean)
                .map_err(|e| e.to_string())
        })
    }

    pub fn timestamp(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| {
            OffsetDateTime::parse(raw, &Rfc3339)
                .map(SqlValue::Timestamp)
                .map_err(|e| e.to_string())
        })
    }

    pub fn uuid(self, path: impl Into<String>) -> Self {
        self.with_decoder(path, |raw| {
            Uuid::parse_str(raw)
                .map(SqlValue::Uuid)
                .map_err(|e| e.to_string())
        })
    }

    fn decode(&self, path: &str, raw: &str) -> QueryResult<SqlValue> {
        let decoder = self
            .decoders
            .get(path)
            .ok_or_else(|| QueryError::UnknownPath(path.to_string()))?;

        decoder(raw).map_err(|reason| QueryError::Decode {
            path: path.to_string(),
            reason,
        })
    }
}

impl fmt::Debug for KeysetDecoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("KeysetDecoders").field("paths", &paths).finish()
    }
}

/// Rendered keyset clauses ready for a SQL backend.
#[derive(Clone, Debug, PartialEq)]
pub struct KeysetSql {
    /// Parenthesized disjunction with `?` placeholders.
    pub where_sql: String,
    /// Bind values in placeholder order.
    pub args: Vec<SqlValue>,
    /// Comma-separated `path ASC|DESC` pairs.
    pub order_by_sql: String,
}

fn op_sql(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::Lt => "<",
        CompareOp::Gt => ">",
    }
}

fn order_sql(order: Order) -> &'static str {
    match order {
        Order::Asc => "ASC",
        Order::Desc => "DESC",
    }
}

/// Render the keyset predicate of `payload` as SQL.
///
/// Returns `None` for an empty payload: the first page has no cursor, and the
/// default ORDER BY is the caller's choice.
pub fn keyset_where_order(
    payload: &KeysetPayload,
    decoders: &KeysetDecoders,
) -> QueryResult<Option<KeysetSql>> {
    let predicate = keyset_predicate(payload, |path, raw, op| {
        let value = decoders.decode(path, raw)?;
        Ok((format!("{path} {} ?", op_sql(op)), value))
    })?;

    let Some(predicate) = predicate else {
        return Ok(None);
    };

    let mut args = Vec::new();
    let branches: Vec<String> = predicate
        .branches
        .into_iter()
        .map(|conjuncts| {
            let fragments: Vec<String> = conjuncts
                .into_iter()
                .map(|(fragment, value)| {
                    args.push(value);
                    fragment
                })
                .collect();
            format!("({})", fragments.join(" AND "))
        })
        .collect();

    let where_sql = format!("({})", branches.join(" OR "));
    let order_by_sql = predicate
        .order_by
        .iter()
        .map(|(path, order)| format!("{path} {}", order_sql(*order)))
        .collect::<Vec<_>>()
        .join(", ");

    tracing::debug!(
        where_clause = %where_sql,
        order_by = %order_by_sql,
        "built keyset pagination clauses"
    );

    Ok(Some(KeysetSql {
        where_sql,
        args,
        order_by_sql,
    }))
}
