//! Best-effort confirmation emails.
//!
//! A notifier failure is reported to the caller as a value so it can be
//! logged; the ingress pipeline never turns it into a failed submission.

pub mod memory;
pub mod smtp;
pub mod template;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rsvp_core::config::Settings;

use crate::error::NotifyResult;
pub use memory::MemoryNotifier;
pub use smtp::SmtpNotifier;
pub use template::{Confirmation, render_confirmation};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait Notifier: Send + Sync {
    /// ## Summary
    /// Dispatches one rendered confirmation.
    ///
    /// ## Errors
    /// Returns an error if the message cannot be built or delivered.
    fn send<'a>(&'a self, confirmation: &'a Confirmation) -> BoxFuture<'a, NotifyResult<()>>;
}

/// Notifier used when email is disabled: logs the confirmation and drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send<'a>(&'a self, confirmation: &'a Confirmation) -> BoxFuture<'a, NotifyResult<()>> {
        Box::pin(async move {
            tracing::info!(
                subject = %confirmation.subject,
                "Email notifications disabled, confirmation not sent"
            );
            Ok(())
        })
    }
}

/// ## Summary
/// Builds the notifier selected by `notify.enabled`.
///
/// ## Errors
/// Returns an error if SMTP is enabled but incompletely configured.
pub fn notifier_from_settings(settings: &Settings) -> NotifyResult<Arc<dyn Notifier>> {
    if settings.notify.enabled {
        Ok(Arc::new(SmtpNotifier::from_config(
            &settings.notify,
            &settings.wedding,
        )?))
    } else {
        Ok(Arc::new(LogNotifier))
    }
}
