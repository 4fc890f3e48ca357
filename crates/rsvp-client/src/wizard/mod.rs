//! Three-step RSVP form as an explicit state machine.
//!
//! The wizard never performs I/O. [`Wizard::apply`] consumes one [`Intent`]
//! and returns the [`Effect`]s the caller must carry out, such as sending the
//! collected submission or showing an alert.

pub mod form;
pub mod validation;
pub mod view;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rsvp_core::model::RsvpSubmission;

use crate::collect::collect;
use form::{FieldChange, FormState};
use validation::{WizardField, validate_step};

pub const TOTAL_STEPS: u8 = 3;

pub const SUBMISSION_FAILED_ALERT: &str =
    "There was an error submitting your RSVP. Please try again or contact us directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    /// A submission is in flight; every control is locked.
    Submitting,
    /// The success modal is showing.
    Submitted,
}

/// How an in-flight submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    /// The server answered with an error envelope carrying this message.
    Rejected(String),
    /// Transport or decoding failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    FieldChanged(FieldChange),
    Submit { at: DateTime<Utc> },
    SubmissionFinished(SubmissionOutcome),
    /// Closes the success modal.
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Transmit(Box<RsvpSubmission>),
    Alert(String),
    ShowSuccess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    form: FormState,
    step: u8,
    phase: Phase,
    errors: BTreeSet<WizardField>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            step: 1,
            phase: Phase::Editing,
            errors: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fields currently flagged inline.
    #[must_use]
    pub fn errors(&self) -> &BTreeSet<WizardField> {
        &self.errors
    }

    /// Clears every selection and returns to step 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Validates the current step, replacing the inline flags. Returns the
    /// blocking alert as an effect when the step raised one.
    fn check_step(&mut self, effects: &mut Vec<Effect>) -> bool {
        let errors = validate_step(self.step, &self.form);
        let passed = errors.passed();
        self.errors = errors.fields;
        if let Some(alert) = errors.alert {
            effects.push(Effect::Alert(alert));
        }
        passed
    }

    /// ## Summary
    /// Feeds one intent through the state machine.
    ///
    /// While a submission is in flight only its completion is accepted, and
    /// once the success modal is up only `Dismiss` is.
    pub fn apply(&mut self, intent: Intent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match (self.phase, intent) {
            (Phase::Editing, Intent::Next) => {
                if self.step < TOTAL_STEPS && self.check_step(&mut effects) {
                    self.step += 1;
                }
            }
            (Phase::Editing, Intent::Prev) => {
                self.step = self.step.saturating_sub(1).max(1);
            }
            (Phase::Editing, Intent::FieldChanged(change)) => self.form.apply(change),
            (Phase::Editing, Intent::Submit { at }) => {
                if self.step == TOTAL_STEPS && self.check_step(&mut effects) {
                    self.phase = Phase::Submitting;
                    effects.push(Effect::Transmit(Box::new(collect(&self.form, at))));
                }
            }
            (Phase::Submitting, Intent::SubmissionFinished(outcome)) => match outcome {
                SubmissionOutcome::Accepted => {
                    self.phase = Phase::Submitted;
                    effects.push(Effect::ShowSuccess);
                }
                SubmissionOutcome::Rejected(message) => {
                    self.phase = Phase::Editing;
                    effects.push(Effect::Alert(message));
                }
                SubmissionOutcome::Failed => {
                    self.phase = Phase::Editing;
                    effects.push(Effect::Alert(SUBMISSION_FAILED_ALERT.to_string()));
                }
            },
            (Phase::Submitted, Intent::Dismiss) => self.reset(),
            (phase, intent) => {
                tracing::debug!(?phase, ?intent, "Ignoring intent");
            }
        }
        effects
    }
}
