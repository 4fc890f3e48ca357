use chrono::{DateTime, Utc};
use rsvp_core::model::SheetLayout;
use rsvp_core::rate_limit::RateLimitPolicy;

/// ## Summary
/// Everything a store needs to admit one sanitized submission.
///
/// A store applies an admission atomically: it purges expired rate-limit
/// entries, counts the phone's remaining entries, and either rejects or
/// appends the row (writing the header first when the sheet is new) and
/// records the rate-limit entry.
#[derive(Debug, Clone)]
pub struct Admission {
    pub sheet: SheetLayout,
    pub row: Vec<String>,
    pub phone: String,
    pub at: DateTime<Utc>,
    pub policy: RateLimitPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// The row was appended. `row_number` is 1-based and counts the header row.
    Admitted { row_number: i64, header_written: bool },
    /// Nothing was written apart from purging expired entries.
    RateLimited { recent: i64 },
}

impl AdmissionOutcome {
    #[must_use]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

impl Admission {
    /// ## Summary
    /// Checks that the row has exactly one cell per header column.
    ///
    /// ## Errors
    /// Returns `DbError::InvalidRow` on a width mismatch.
    pub fn check_width(&self) -> crate::error::DbResult<()> {
        if self.row.len() == self.sheet.width() {
            Ok(())
        } else {
            Err(crate::error::DbError::InvalidRow(format!(
                "row has {} cells, sheet {} has {} columns",
                self.row.len(),
                self.sheet.name,
                self.sheet.width()
            )))
        }
    }
}
