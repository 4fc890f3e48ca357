//! In-process store for tests and single-instance deployments.
//!
//! All state sits behind one async mutex, so admissions are serialized and
//! the purge/count/record sequence is atomic.

use std::collections::HashMap;

use rsvp_core::model::SheetLayout;
use tokio::sync::Mutex;

use crate::db::{BoxFuture, RsvpStore};
use crate::error::DbResult;
use crate::model::admission::{Admission, AdmissionOutcome};
use crate::model::rate_limit::RateLimitEntry;

#[derive(Debug)]
struct MemorySheet {
    layout: SheetLayout,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    sheets: HashMap<String, MemorySheet>,
    rate_limiting: Vec<RateLimitEntry>,
    next_entry_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout the sheet was created with, if it has been written.
    pub async fn layout(&self, sheet: &str) -> Option<SheetLayout> {
        let state = self.state.lock().await;
        state.sheets.get(sheet).map(|s| s.layout.clone())
    }
}

fn count_as_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

impl RsvpStore for MemoryStore {
    #[tracing::instrument(skip(self, admission), fields(sheet = %admission.sheet.name))]
    fn admit<'a>(&'a self, admission: &'a Admission) -> BoxFuture<'a, DbResult<AdmissionOutcome>> {
        Box::pin(async move {
            admission.check_width()?;

            let mut guard = self.state.lock().await;
            let state = &mut *guard;

            let cutoff = admission.policy.cutoff(admission.at);
            let before = state.rate_limiting.len();
            state
                .rate_limiting
                .retain(|entry| entry.submitted_at >= cutoff);
            let purged = before - state.rate_limiting.len();

            let recent = count_as_i64(
                state
                    .rate_limiting
                    .iter()
                    .filter(|entry| entry.phone == admission.phone)
                    .count(),
            );
            if admission.policy.is_exceeded(recent) {
                tracing::debug!(recent, purged, "Rate limit exhausted, nothing appended");
                return Ok(AdmissionOutcome::RateLimited { recent });
            }

            let mut header_written = false;
            let sheet = state
                .sheets
                .entry(admission.sheet.name.clone())
                .or_insert_with(|| {
                    header_written = true;
                    MemorySheet {
                        layout: admission.sheet.clone(),
                        rows: Vec::new(),
                    }
                });
            sheet.rows.push(admission.row.clone());
            let data_rows = count_as_i64(sheet.rows.len());

            state.next_entry_id += 1;
            state.rate_limiting.push(RateLimitEntry {
                id: state.next_entry_id,
                phone: admission.phone.clone(),
                submitted_at: admission.at,
                count: 1,
            });

            tracing::debug!(data_rows, purged, header_written, "Row appended");
            Ok(AdmissionOutcome::Admitted {
                row_number: data_rows + 1,
                header_written,
            })
        })
    }

    fn rows<'a>(&'a self, sheet: &'a str) -> BoxFuture<'a, DbResult<Vec<Vec<String>>>> {
        Box::pin(async move {
            let state = self.state.lock().await;
            Ok(state.sheets.get(sheet).map_or_else(Vec::new, |s| {
                std::iter::once(s.layout.header.clone())
                    .chain(s.rows.iter().cloned())
                    .collect()
            }))
        })
    }

    fn rate_limit_entries<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, DbResult<Vec<RateLimitEntry>>> {
        Box::pin(async move {
            let state = self.state.lock().await;
            Ok(state
                .rate_limiting
                .iter()
                .filter(|entry| entry.phone == phone)
                .cloned()
                .collect())
        })
    }
}
