//! Atomic admission of one submission.

use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::query::{rate_limit, sheet};
use crate::error::DbResult;
use crate::model::admission::{Admission, AdmissionOutcome};
use crate::model::rate_limit::NewRateLimitEntry;
use crate::model::sheet::{NewSheet, NewSheetRow};

/// ## Summary
/// Runs the purge, count, header creation, row append and rate-limit record
/// for one admission.
///
/// Must run inside a transaction. Concurrent admissions for the same phone
/// are serialized by a transaction-scoped advisory lock on the phone, so the
/// count cannot go stale between check and record. Header creation relies on
/// the sheet primary key, so only one concurrent first write creates it.
///
/// ## Errors
/// Returns a database error if any statement fails, or `InvalidRow` if the
/// row width does not match the sheet header.
#[tracing::instrument(skip(conn, admission), fields(sheet = %admission.sheet.name))]
pub async fn admit(
    conn: &mut DbConnection<'_>,
    admission: &Admission,
) -> DbResult<AdmissionOutcome> {
    admission.check_width()?;

    diesel::sql_query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind::<Text, _>(admission.phone.as_str())
        .execute(conn)
        .await?;

    let purged = rate_limit::purge_before(conn, admission.policy.cutoff(admission.at)).await?;
    let recent = rate_limit::count_for_phone(conn, &admission.phone).await?;
    if admission.policy.is_exceeded(recent) {
        tracing::debug!(recent, purged, "Rate limit exhausted, nothing appended");
        return Ok(AdmissionOutcome::RateLimited { recent });
    }

    let header_written =
        sheet::create_if_missing(conn, &NewSheet::try_from(&admission.sheet)?).await?;
    if header_written {
        tracing::info!("Created sheet and wrote header row");
    }

    let row = sheet::append_row(
        conn,
        &NewSheetRow {
            sheet_name: &admission.sheet.name,
            cells: &admission.row,
            appended_at: admission.at,
        },
    )
    .await?;

    rate_limit::record(conn, &NewRateLimitEntry::single(&admission.phone, admission.at)).await?;

    let data_rows = sheet::rows_through(conn, &admission.sheet.name, row.id).await?;
    tracing::debug!(row_id = row.id, data_rows, purged, "Row appended");

    Ok(AdmissionOutcome::Admitted {
        row_number: data_rows + 1,
        header_written,
    })
}
