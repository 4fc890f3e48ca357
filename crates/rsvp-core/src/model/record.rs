//! The RSVP record in its two shapes.
//!
//! [`RsvpSubmission`] is the flat, loosely-typed JSON the form posts: every
//! field optional and string-valued so that validation can name the exact
//! field that is wrong instead of failing deserialization. [`RsvpRecord`] is
//! the validated form with the companion invariants encoded in the types and
//! the `"None"`/`"N/A"` fallbacks applied.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{NO_DIETARY_NOTE, NOT_APPLICABLE};
use crate::error::{CoreError, CoreResult};
use crate::model::field::RecordField;
use crate::validation::validate;

/// Tri-state answer used for every boolean-valued column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Answer {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotApplicable => NOT_APPLICABLE,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            NOT_APPLICABLE => Some(Self::NotApplicable),
            _ => None,
        }
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }

    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the couple the guest is a friend of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Bride,
    Groom,
}

impl Relation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bride => "Bride",
            Self::Groom => "Groom",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Bride" => Some(Self::Bride),
            "Groom" => Some(Self::Groom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of attending parties (0, 1 or 2) for one event.
///
/// Serialized as a number, or `"N/A"` when nobody attends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuestCount(pub u8);

impl GuestCount {
    #[must_use]
    pub fn of(parties: impl IntoIterator<Item = bool>) -> Self {
        let count = parties.into_iter().filter(|attending| *attending).count();
        Self(u8::try_from(count).unwrap_or(u8::MAX))
    }
}

impl std::fmt::Display for GuestCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            f.write_str(NOT_APPLICABLE)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for GuestCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 == 0 {
            serializer.serialize_str(NOT_APPLICABLE)
        } else {
            serializer.serialize_u8(self.0)
        }
    }
}

/// Lenient: the count is advisory, so anything unreadable (negative,
/// fractional, free text, nested values) reads as zero instead of rejecting
/// the submission.
impl<'de> Deserialize<'de> for GuestCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(u8::try_from(n).unwrap_or(u8::MAX)),
            Raw::Text(text) => Self(text.trim().parse::<u8>().unwrap_or_default()),
            Raw::Other(_) => Self(0),
        })
    }
}

/// Flat record as posted by the form.
///
/// Guest counts are advisory: the server recomputes them from the attendance
/// flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub timestamp: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub friend_of: Option<String>,
    pub has_plus_one: Option<String>,
    pub plus_one_name: Option<String>,
    pub your_church: Option<String>,
    pub your_reception: Option<String>,
    pub plus_one_church: Option<String>,
    pub plus_one_reception: Option<String>,
    pub church_guest_count: Option<GuestCount>,
    pub reception_guest_count: Option<GuestCount>,
    pub your_lunch_dietary: Option<String>,
    pub plus_one_lunch_dietary: Option<String>,
    pub your_dinner_dietary: Option<String>,
    pub plus_one_dinner_dietary: Option<String>,
    pub song: Option<String>,
    pub message: Option<String>,
}

impl RsvpSubmission {
    /// Raw string value of a field, if the form sent one.
    #[must_use]
    pub fn text(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::Timestamp => &self.timestamp,
            RecordField::FullName => &self.full_name,
            RecordField::Email => &self.email,
            RecordField::Phone => &self.phone,
            RecordField::FriendOf => &self.friend_of,
            RecordField::HasPlusOne => &self.has_plus_one,
            RecordField::PlusOneName => &self.plus_one_name,
            RecordField::YourChurch => &self.your_church,
            RecordField::YourReception => &self.your_reception,
            RecordField::PlusOneChurch => &self.plus_one_church,
            RecordField::PlusOneReception => &self.plus_one_reception,
            RecordField::YourLunchDietary => &self.your_lunch_dietary,
            RecordField::PlusOneLunchDietary => &self.plus_one_lunch_dietary,
            RecordField::YourDinnerDietary => &self.your_dinner_dietary,
            RecordField::PlusOneDinnerDietary => &self.plus_one_dinner_dietary,
            RecordField::Song => &self.song,
            RecordField::Message => &self.message,
            RecordField::ChurchGuestCount | RecordField::ReceptionGuestCount => &None,
        };
        value.as_deref()
    }

    /// Parsed answer for a boolean-valued field; absent means `N/A`.
    #[must_use]
    pub fn answer(&self, field: RecordField) -> Option<Answer> {
        match self.text(field) {
            None => Some(Answer::NotApplicable),
            Some(value) => Answer::parse(value),
        }
    }
}

/// Which events one party attends, with the dietary note for each meal.
///
/// A note is present iff the matching event is attended: the ceremony is
/// followed by lunch, the reception by dinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub church: bool,
    pub reception: bool,
    pub lunch_dietary: Option<String>,
    pub dinner_dietary: Option<String>,
}

impl Attendance {
    /// Applies the submission-time fallbacks: an attended meal with an empty
    /// note becomes `"None"`, a skipped one carries no note at all.
    #[must_use]
    pub fn new(church: bool, reception: bool, lunch: Option<&str>, dinner: Option<&str>) -> Self {
        Self {
            church,
            reception,
            lunch_dietary: church.then(|| dietary_or_none(lunch)),
            dinner_dietary: reception.then(|| dietary_or_none(dinner)),
        }
    }

    #[must_use]
    pub fn attends_any(&self) -> bool {
        self.church || self.reception
    }

    #[must_use]
    pub fn lunch_cell(&self) -> &str {
        self.lunch_dietary.as_deref().unwrap_or(NOT_APPLICABLE)
    }

    #[must_use]
    pub fn dinner_cell(&self) -> &str {
        self.dinner_dietary.as_deref().unwrap_or(NOT_APPLICABLE)
    }
}

fn dietary_or_none(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(note) if !note.is_empty() && note != NOT_APPLICABLE => note.to_string(),
        _ => NO_DIETARY_NOTE.to_string(),
    }
}

/// Returns the note only if it says something beyond the placeholders.
#[must_use]
pub fn declared_note(note: Option<&str>) -> Option<&str> {
    note.map(str::trim)
        .filter(|n| !n.is_empty() && *n != NO_DIETARY_NOTE && *n != NOT_APPLICABLE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Companion {
    pub name: String,
    pub attendance: Attendance,
}

/// A validated RSVP, ready to be sanitized and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpRecord {
    pub timestamp: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub relation: Relation,
    pub you: Attendance,
    pub plus_one: Option<Companion>,
    pub song: Option<String>,
    pub message: Option<String>,
}

impl RsvpRecord {
    #[must_use]
    pub fn church_guest_count(&self) -> GuestCount {
        GuestCount::of([
            self.you.church,
            self.plus_one.as_ref().is_some_and(|c| c.attendance.church),
        ])
    }

    #[must_use]
    pub fn reception_guest_count(&self) -> GuestCount {
        GuestCount::of([
            self.you.reception,
            self.plus_one.as_ref().is_some_and(|c| c.attendance.reception),
        ])
    }

    /// Rendered cell for one column.
    #[must_use]
    pub fn cell(&self, field: RecordField) -> String {
        let companion = self.plus_one.as_ref();
        let companion_flag = |flag: fn(&Attendance) -> bool| {
            companion.map_or(Answer::NotApplicable, |c| Answer::from_bool(flag(&c.attendance)))
        };
        match field {
            RecordField::Timestamp => self.timestamp.clone(),
            RecordField::FullName => self.full_name.clone(),
            RecordField::Email => self.email.clone(),
            RecordField::Phone => self.phone.clone(),
            RecordField::FriendOf => self.relation.to_string(),
            RecordField::HasPlusOne => Answer::from_bool(companion.is_some()).to_string(),
            RecordField::PlusOneName => {
                companion.map_or_else(|| NOT_APPLICABLE.to_string(), |c| c.name.clone())
            }
            RecordField::YourChurch => Answer::from_bool(self.you.church).to_string(),
            RecordField::YourReception => Answer::from_bool(self.you.reception).to_string(),
            RecordField::PlusOneChurch => companion_flag(|a| a.church).to_string(),
            RecordField::PlusOneReception => companion_flag(|a| a.reception).to_string(),
            RecordField::ChurchGuestCount => self.church_guest_count().to_string(),
            RecordField::ReceptionGuestCount => self.reception_guest_count().to_string(),
            RecordField::YourLunchDietary => self.you.lunch_cell().to_string(),
            RecordField::PlusOneLunchDietary => companion
                .map_or(NOT_APPLICABLE, |c| c.attendance.lunch_cell())
                .to_string(),
            RecordField::YourDinnerDietary => self.you.dinner_cell().to_string(),
            RecordField::PlusOneDinnerDietary => companion
                .map_or(NOT_APPLICABLE, |c| c.attendance.dinner_cell())
                .to_string(),
            RecordField::Song => self.song.as_deref().unwrap_or(NOT_APPLICABLE).to_string(),
            RecordField::Message => self.message.as_deref().unwrap_or(NOT_APPLICABLE).to_string(),
        }
    }

    /// The record as one sheet row, in column order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        RecordField::COLUMNS.iter().map(|f| self.cell(*f)).collect()
    }

    /// Applies `f` to every free-form string the guest typed.
    #[must_use]
    pub fn map_text(self, f: impl Fn(&str) -> String) -> Self {
        let map_attendance = |a: Attendance| Attendance {
            lunch_dietary: a.lunch_dietary.as_deref().map(&f),
            dinner_dietary: a.dinner_dietary.as_deref().map(&f),
            ..a
        };
        Self {
            timestamp: f(&self.timestamp),
            full_name: f(&self.full_name),
            email: f(&self.email),
            phone: f(&self.phone),
            relation: self.relation,
            you: map_attendance(self.you),
            plus_one: self.plus_one.map(|c| Companion {
                name: f(&c.name),
                attendance: map_attendance(c.attendance),
            }),
            song: self.song.as_deref().map(&f),
            message: self.message.as_deref().map(&f),
        }
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NOT_APPLICABLE)
        .map(str::to_string)
}

fn required_text(submission: &RsvpSubmission, field: RecordField) -> CoreResult<String> {
    submission
        .text(field)
        .map(|v| v.trim().to_string())
        .ok_or(CoreError::InvariantViolation("required field missing after validation"))
}

impl TryFrom<&RsvpSubmission> for RsvpRecord {
    type Error = CoreError;

    /// ## Summary
    /// Validates the submission and recomputes every derived column from the
    /// attendance flags, so hidden inputs cannot leak stale values.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first offending field.
    fn try_from(submission: &RsvpSubmission) -> CoreResult<Self> {
        validate(submission)?;

        let flag = |field| submission.answer(field).is_some_and(Answer::is_yes);
        let relation = submission
            .text(RecordField::FriendOf)
            .and_then(Relation::parse)
            .ok_or(CoreError::InvariantViolation("relation missing after validation"))?;

        let you = Attendance::new(
            flag(RecordField::YourChurch),
            flag(RecordField::YourReception),
            submission.text(RecordField::YourLunchDietary),
            submission.text(RecordField::YourDinnerDietary),
        );

        let plus_one = if flag(RecordField::HasPlusOne) {
            Some(Companion {
                name: required_text(submission, RecordField::PlusOneName)?,
                attendance: Attendance::new(
                    flag(RecordField::PlusOneChurch),
                    flag(RecordField::PlusOneReception),
                    submission.text(RecordField::PlusOneLunchDietary),
                    submission.text(RecordField::PlusOneDinnerDietary),
                ),
            })
        } else {
            None
        };

        Ok(Self {
            timestamp: submission
                .text(RecordField::Timestamp)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            full_name: required_text(submission, RecordField::FullName)?,
            email: required_text(submission, RecordField::Email)?,
            phone: required_text(submission, RecordField::Phone)?,
            relation,
            you,
            plus_one,
            song: optional_text(submission.text(RecordField::Song)),
            message: optional_text(submission.text(RecordField::Message)),
        })
    }
}
