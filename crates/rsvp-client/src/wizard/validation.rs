use std::collections::BTreeSet;

use rsvp_core::validation::is_valid_email;

use super::form::FormState;

pub const COMPANION_EVENTS_ALERT: &str = "Please select at least one event for your +1";

/// Form controls that can carry an inline error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardField {
    FullName,
    Email,
    Phone,
    FriendOf,
    HasPlusOne,
    PlusOneName,
    YourEvents,
}

/// Outcome of validating one step.
///
/// Field flags are shown inline; the alert, if any, blocks until dismissed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepErrors {
    pub fields: BTreeSet<WizardField>,
    pub alert: Option<String>,
}

impl StepErrors {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.fields.is_empty() && self.alert.is_none()
    }

    fn flag_if(&mut self, failed: bool, field: WizardField) {
        if failed {
            self.fields.insert(field);
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn validate_guest(form: &FormState) -> StepErrors {
    let mut errors = StepErrors::default();
    errors.flag_if(blank(&form.full_name), WizardField::FullName);
    errors.flag_if(!is_valid_email(form.email.trim()), WizardField::Email);
    errors.flag_if(blank(&form.phone), WizardField::Phone);
    errors.flag_if(form.friend_of.is_none(), WizardField::FriendOf);
    errors.flag_if(form.has_plus_one.is_none(), WizardField::HasPlusOne);
    errors.flag_if(
        form.brings_plus_one() && blank(&form.plus_one_name),
        WizardField::PlusOneName,
    );
    errors
}

fn validate_events(form: &FormState) -> StepErrors {
    let mut errors = StepErrors::default();
    errors.flag_if(!form.you.attends_any(), WizardField::YourEvents);
    if form.brings_plus_one() && !form.plus_one.attends_any() {
        errors.alert = Some(COMPANION_EVENTS_ALERT.to_string());
    }
    errors
}

/// ## Summary
/// Validates the fields collected on `step`.
///
/// Step 1 covers the guest's details, step 2 the event choices. Step 3 holds
/// only optional fields and always passes.
#[must_use]
pub fn validate_step(step: u8, form: &FormState) -> StepErrors {
    match step {
        1 => validate_guest(form),
        2 => validate_events(form),
        _ => StepErrors::default(),
    }
}
