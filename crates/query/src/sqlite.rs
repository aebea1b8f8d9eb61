//! SQLite binding glue.

use crate::sql::SqlValue;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// Bind rendered keyset arguments to a query, in placeholder order.
pub fn bind_query<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Real(v) => query.bind(v),
            SqlValue::Boolean(v) => query.bind(v),
            SqlValue::Timestamp(v) => query.bind(v),
            SqlValue::Uuid(v) => query.bind(v),
        };
    }
    query
}

/// [`bind_query`] for typed `query_as` queries.
pub fn bind_query_as<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    args: &'q [SqlValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Real(v) => query.bind(v),
            SqlValue::Boolean(v) => query.bind(v),
            SqlValue::Timestamp(v) => query.bind(v),
            SqlValue::Uuid(v) => query.bind(v),
        };
    }
    query
}
