//! Structural validation of an incoming submission.
//!
//! Validation is a hard reject: the first violation found is returned and the
//! submission is not partially accepted. Messages name the offending field by
//! its column title so they can be shown to the guest verbatim.

use std::sync::LazyLock;

use regex_lite::Regex;
use thiserror::Error;

use crate::constants::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_TEXT_LEN};
use crate::model::field::RecordField;
use crate::model::record::{Answer, Relation, RsvpSubmission};

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: RecordField,
    pub message: String,
}

impl ValidationError {
    fn new(field: RecordField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn required(field: RecordField) -> Self {
        Self::new(field, format!("{field} is required"))
    }

    fn too_long(field: RecordField, max: usize) -> Self {
        Self::new(field, format!("{field} must be at most {max} characters"))
    }
}

pub type ValidationResult = std::result::Result<(), ValidationError>;

const REQUIRED: [(RecordField, usize); 4] = [
    (RecordField::FullName, MAX_NAME_LEN),
    (RecordField::Email, MAX_EMAIL_LEN),
    (RecordField::Phone, MAX_PHONE_LEN),
    (RecordField::FriendOf, MAX_NAME_LEN),
];

const ANSWERS: [RecordField; 5] = [
    RecordField::HasPlusOne,
    RecordField::YourChurch,
    RecordField::YourReception,
    RecordField::PlusOneChurch,
    RecordField::PlusOneReception,
];

const FREE_TEXT: [RecordField; 7] = [
    RecordField::Timestamp,
    RecordField::YourLunchDietary,
    RecordField::PlusOneLunchDietary,
    RecordField::YourDinnerDietary,
    RecordField::PlusOneDinnerDietary,
    RecordField::Song,
    RecordField::Message,
];

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// ## Summary
/// Returns true if the phone number only uses digits, spaces, `+`, `-` and parentheses.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

/// ## Summary
/// Returns true for a loose `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// ## Summary
/// Validates the submission field by field.
///
/// ## Errors
/// Returns the first violation: a missing required field, an oversized value,
/// a malformed phone or email, an unknown relation, a boolean field outside
/// `Yes`/`No`/`N/A`, or a missing plus-one name when bringing a plus one.
pub fn validate(submission: &RsvpSubmission) -> ValidationResult {
    for (field, max) in REQUIRED {
        let value = submission.text(field).map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(ValidationError::required(field));
        }
        if char_len(value) > max {
            return Err(ValidationError::too_long(field, max));
        }
    }

    let phone = submission.text(RecordField::Phone).unwrap_or_default().trim();
    if !is_valid_phone(phone) {
        return Err(ValidationError::new(
            RecordField::Phone,
            "Phone may only contain digits, spaces, +, -, and parentheses",
        ));
    }

    let email = submission.text(RecordField::Email).unwrap_or_default().trim();
    if !is_valid_email(email) {
        return Err(ValidationError::new(RecordField::Email, "Invalid email format"));
    }

    if submission
        .text(RecordField::FriendOf)
        .and_then(Relation::parse)
        .is_none()
    {
        return Err(ValidationError::new(
            RecordField::FriendOf,
            "Friend Of must be either Bride or Groom",
        ));
    }

    for field in ANSWERS {
        if submission.answer(field).is_none() {
            return Err(ValidationError::new(
                field,
                format!("{field} must be Yes, No, or N/A"),
            ));
        }
    }

    let plus_one_name = submission
        .text(RecordField::PlusOneName)
        .map(str::trim)
        .unwrap_or_default();
    if char_len(plus_one_name) > MAX_NAME_LEN {
        return Err(ValidationError::too_long(RecordField::PlusOneName, MAX_NAME_LEN));
    }
    if submission.answer(RecordField::HasPlusOne) == Some(Answer::Yes)
        && (plus_one_name.is_empty() || plus_one_name == crate::constants::NOT_APPLICABLE)
    {
        return Err(ValidationError::new(
            RecordField::PlusOneName,
            "Plus One Name is required when bringing a plus one",
        ));
    }

    for field in FREE_TEXT {
        if submission
            .text(field)
            .is_some_and(|value| char_len(value.trim()) > MAX_TEXT_LEN)
        {
            return Err(ValidationError::too_long(field, MAX_TEXT_LEN));
        }
    }

    Ok(())
}
