//! Flattens the wizard's form into the record the ingress endpoint expects.

use chrono::{DateTime, SecondsFormat, Utc};
use rsvp_core::constants::{NO_DIETARY_NOTE, NOT_APPLICABLE};
use rsvp_core::model::{Answer, GuestCount, RsvpSubmission};

use crate::wizard::form::FormState;

fn dietary(attending: bool, note: &str) -> String {
    if !attending {
        NOT_APPLICABLE.to_string()
    } else if note.trim().is_empty() {
        NO_DIETARY_NOTE.to_string()
    } else {
        note.to_string()
    }
}

fn or_not_applicable(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_APPLICABLE.to_string()
    } else {
        value.to_string()
    }
}

/// ## Summary
/// Builds the submission for the current form.
///
/// Fields that do not apply are sent as `"N/A"`: the companion's name and
/// events without a plus-one, and dietary notes for events not attended. An
/// attended meal with an empty note is sent as `"None"`.
#[must_use]
pub fn collect(form: &FormState, at: DateTime<Utc>) -> RsvpSubmission {
    let brings = form.brings_plus_one();
    let companion = |attending: bool| {
        if brings {
            Answer::from_bool(attending)
        } else {
            Answer::NotApplicable
        }
    };
    let plus_one = &form.plus_one;
    let companion_church = brings && plus_one.church;
    let companion_reception = brings && plus_one.reception;

    RsvpSubmission {
        timestamp: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        full_name: Some(form.full_name.clone()),
        email: Some(form.email.clone()),
        phone: Some(form.phone.clone()),
        friend_of: form.friend_of.map(|r| r.as_str().to_string()),
        has_plus_one: form
            .has_plus_one
            .map(|brings| Answer::from_bool(brings).as_str().to_string()),
        plus_one_name: Some(if brings {
            form.plus_one_name.clone()
        } else {
            NOT_APPLICABLE.to_string()
        }),
        your_church: Some(Answer::from_bool(form.you.church).as_str().to_string()),
        your_reception: Some(Answer::from_bool(form.you.reception).as_str().to_string()),
        plus_one_church: Some(companion(plus_one.church).as_str().to_string()),
        plus_one_reception: Some(companion(plus_one.reception).as_str().to_string()),
        church_guest_count: Some(GuestCount::of([form.you.church, companion_church])),
        reception_guest_count: Some(GuestCount::of([form.you.reception, companion_reception])),
        your_lunch_dietary: Some(dietary(form.you.church, &form.you.lunch_dietary)),
        plus_one_lunch_dietary: Some(dietary(companion_church, &plus_one.lunch_dietary)),
        your_dinner_dietary: Some(dietary(form.you.reception, &form.you.dinner_dietary)),
        plus_one_dinner_dietary: Some(dietary(companion_reception, &plus_one.dinner_dietary)),
        song: Some(or_not_applicable(&form.song)),
        message: Some(or_not_applicable(&form.message)),
    }
}
