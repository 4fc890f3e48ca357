//! Ingress pipeline for one RSVP submission.
//!
//! Validation runs first and rejects without touching the store. The
//! sanitized row is then admitted in a single store operation that covers
//! the rate-limit check, the append and the rate-limit bookkeeping. The
//! confirmation email is attempted only after the row is stored, and its
//! failure is logged and dropped.


use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use rsvp_core::config::{Settings, WeddingConfig};
use rsvp_core::model::{RsvpRecord, RsvpSubmission, SheetLayout};
use rsvp_core::rate_limit::RateLimitPolicy;
use rsvp_core::sanitize::sanitize_record;
use rsvp_db::db::RsvpStore;
use rsvp_db::model::admission::{Admission, AdmissionOutcome};

use crate::error::{ServiceError, ServiceResult};
use crate::notify::{Notifier, render_confirmation};

/// Result of an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// 1-based sheet row of the stored record; the header is row 1.
    pub row_number: i64,
    pub header_written: bool,
    pub notified: bool,
}

pub struct RsvpService {
    store: Arc<dyn RsvpStore>,
    notifier: Arc<dyn Notifier>,
    sheet: SheetLayout,
    policy: RateLimitPolicy,
    wedding: WeddingConfig,
}

impl std::fmt::Debug for RsvpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsvpService")
            .field("sheet", &self.sheet.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RsvpService {
    #[must_use]
    pub fn new(
        store: Arc<dyn RsvpStore>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            store,
            notifier,
            sheet: SheetLayout::rsvp(settings.sheet.name.clone()),
            policy: RateLimitPolicy::from(settings.rate_limit),
            wedding: settings.wedding.clone(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    #[must_use]
    pub fn sheet(&self) -> &SheetLayout {
        &self.sheet
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn RsvpStore> {
        &self.store
    }

    /// ## Summary
    /// Validates, sanitizes and admits one submission, then attempts the
    /// confirmation email.
    ///
    /// A missing client timestamp is replaced with `now`. The rate-limit key
    /// is the sanitized phone number, exactly as stored in the sheet.
    ///
    /// ## Errors
    /// - `ServiceError::CoreError` wrapping a `ValidationError` if a field is
    ///   missing, oversized or malformed. Nothing is written.
    /// - `ServiceError::RateLimited` if the phone exhausted its allowance.
    ///   Nothing is written apart from purging expired entries.
    /// - `ServiceError::DatabaseError` if the store fails.
    ///
    /// A failed email is never an error.
    #[tracing::instrument(skip_all)]
    pub async fn submit(
        &self,
        submission: &RsvpSubmission,
        now: DateTime<Utc>,
    ) -> ServiceResult<Receipt> {
        let mut record = RsvpRecord::try_from(submission).inspect_err(|e| {
            tracing::info!(error = %e, "Submission rejected by validation");
        })?;
        if record.timestamp.is_empty() {
            record.timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        }
        let record = sanitize_record(record);

        let admission = Admission {
            sheet: self.sheet.clone(),
            row: record.to_row(),
            phone: record.phone.clone(),
            at: now,
            policy: self.policy,
        };

        let (row_number, header_written) = match self.store.admit(&admission).await {
            Ok(AdmissionOutcome::Admitted {
                row_number,
                header_written,
            }) => (row_number, header_written),
            Ok(AdmissionOutcome::RateLimited { recent }) => {
                tracing::info!(recent, "Submission rejected by rate limit");
                return Err(ServiceError::RateLimited {
                    recent,
                    window_hours: self.policy.window_hours(),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store submission");
                return Err(e.into());
            }
        };

        tracing::info!(row_number, header_written, "RSVP stored");

        let notified = self.notify(&record).await;

        Ok(Receipt {
            row_number,
            header_written,
            notified,
        })
    }

    async fn notify(&self, record: &RsvpRecord) -> bool {
        let sent = match render_confirmation(record, &self.wedding) {
            Ok(confirmation) => self.notifier.send(&confirmation).await,
            Err(e) => Err(e),
        };
        match sent {
            Ok(()) => {
                tracing::debug!("Confirmation email dispatched");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to send confirmation email");
                false
            }
        }
    }

    /// ## Summary
    /// Message shown to the guest for a failed submission.
    ///
    /// Validation and rate-limit failures explain themselves; everything
    /// else collapses to the generic failure message.
    #[must_use]
    pub fn public_message(&self, error: &ServiceError) -> String {
        if let Some(validation) = error.as_validation() {
            return validation.message.clone();
        }
        match error {
            ServiceError::RateLimited { .. } => self.policy.retry_message(),
            _ => rsvp_core::constants::GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
