//! Sheet and row queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{sheet, sheet_row};
use crate::model::sheet::{NewSheet, NewSheetRow, Sheet, SheetRow};

/// ## Summary
/// Creates the sheet with its header unless it already exists.
///
/// ## Returns
/// `true` if this call created the sheet and therefore wrote the header.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn create_if_missing(
    conn: &mut DbConnection<'_>,
    new_sheet: &NewSheet<'_>,
) -> diesel::QueryResult<bool> {
    let inserted = diesel::insert_into(sheet::table)
        .values(new_sheet)
        .on_conflict(sheet::name)
        .do_nothing()
        .execute(conn)
        .await?;

    Ok(inserted == 1)
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn append_row(
    conn: &mut DbConnection<'_>,
    row: &NewSheetRow<'_>,
) -> diesel::QueryResult<SheetRow> {
    diesel::insert_into(sheet_row::table)
        .values(row)
        .returning(SheetRow::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Number of data rows in `sheet_name` up to and including the row with `row_id`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn rows_through(
    conn: &mut DbConnection<'_>,
    sheet_name: &str,
    row_id: i64,
) -> diesel::QueryResult<i64> {
    sheet_row::table
        .filter(sheet_row::sheet_name.eq(sheet_name))
        .filter(sheet_row::id.le(row_id))
        .count()
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_sheet(
    conn: &mut DbConnection<'_>,
    name: &str,
) -> diesel::QueryResult<Option<Sheet>> {
    sheet::table
        .find(name)
        .select(Sheet::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads the data rows of `sheet_name` in append order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_rows(
    conn: &mut DbConnection<'_>,
    sheet_name: &str,
) -> diesel::QueryResult<Vec<SheetRow>> {
    sheet_row::table
        .filter(sheet_row::sheet_name.eq(sheet_name))
        .order(sheet_row::id.asc())
        .select(SheetRow::as_select())
        .load(conn)
        .await
}
