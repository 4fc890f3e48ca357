//! Drives a [`Wizard`] against a live transport.

use std::time::Duration;

use chrono::Utc;
use rsvp_core::model::RsvpSubmission;

use crate::error::ClientError;
use crate::transport::Transmit;
use crate::wizard::{Effect, Intent, SubmissionOutcome, Wizard};

pub const NOT_CONFIGURED_ALERT: &str =
    "The RSVP form is not connected yet. Please contact us directly.";

/// Pause between an accepted submission and the success modal.
pub const SUCCESS_DELAY: Duration = Duration::from_secs(1);

pub struct RsvpSession<T> {
    wizard: Wizard,
    transport: T,
    success_delay: Duration,
}

impl<T: Transmit> RsvpSession<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            wizard: Wizard::new(),
            transport,
            success_delay: SUCCESS_DELAY,
        }
    }

    #[must_use]
    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    #[must_use]
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// ## Summary
    /// Applies `intent` and carries out any transmission it triggers.
    ///
    /// Returns the effects left for the page to render: alerts and the
    /// success modal. The step is validated before the endpoint is checked;
    /// an unconfigured transport turns a valid submit into an alert and
    /// leaves the wizard editing.
    pub async fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        let mut rendered = Vec::new();
        let mut pending = self.wizard.apply(intent);
        while let Some(effect) = pending.pop() {
            match effect {
                Effect::Transmit(submission) => {
                    let outcome = if self.transport.is_configured() {
                        self.send(&submission).await
                    } else {
                        tracing::warn!("Submit attempted without a configured endpoint");
                        SubmissionOutcome::Rejected(NOT_CONFIGURED_ALERT.to_string())
                    };
                    pending.extend(self.wizard.apply(Intent::SubmissionFinished(outcome)));
                }
                other => rendered.push(other),
            }
        }
        rendered
    }

    async fn send(&self, submission: &RsvpSubmission) -> SubmissionOutcome {
        match self.transport.transmit(submission).await {
            Ok(()) => {
                tokio::time::sleep(self.success_delay).await;
                SubmissionOutcome::Accepted
            }
            Err(ClientError::Rejected(message)) => {
                tracing::info!(%message, "Submission rejected");
                SubmissionOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Submission failed");
                SubmissionOutcome::Failed
            }
        }
    }

    /// Submits with the current time as the timestamp.
    pub async fn submit(&mut self) -> Vec<Effect> {
        self.dispatch(Intent::Submit { at: Utc::now() }).await
    }
}
