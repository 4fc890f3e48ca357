//! Rate-limit log queries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::rate_limiting;
use crate::model::rate_limit::{NewRateLimitEntry, RateLimitEntry};

/// ## Summary
/// Deletes every entry submitted before `cutoff`, for all phones.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn purge_before(
    conn: &mut DbConnection<'_>,
    cutoff: DateTime<Utc>,
) -> diesel::QueryResult<usize> {
    diesel::delete(rate_limiting::table.filter(rate_limiting::submitted_at.lt(cutoff)))
        .execute(conn)
        .await
}

/// ## Summary
/// Counts the entries logged for `phone`.
///
/// Callers purge first; the count then covers only the current window.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn count_for_phone(conn: &mut DbConnection<'_>, phone: &str) -> diesel::QueryResult<i64> {
    rate_limiting::table
        .filter(rate_limiting::phone.eq(phone))
        .count()
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn record(
    conn: &mut DbConnection<'_>,
    entry: &NewRateLimitEntry<'_>,
) -> diesel::QueryResult<RateLimitEntry> {
    diesel::insert_into(rate_limiting::table)
        .values(entry)
        .returning(RateLimitEntry::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads the entries logged for `phone`, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn entries_for_phone(
    conn: &mut DbConnection<'_>,
    phone: &str,
) -> diesel::QueryResult<Vec<RateLimitEntry>> {
    rate_limiting::table
        .filter(rate_limiting::phone.eq(phone))
        .order((rate_limiting::submitted_at.asc(), rate_limiting::id.asc()))
        .select(RateLimitEntry::as_select())
        .load(conn)
        .await
}
