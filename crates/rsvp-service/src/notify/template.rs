//! Confirmation email rendering.
//!
//! Both bodies are rendered from the same [`Summary`] through askama
//! templates under `templates/`, so the HTML and the plain text always agree
//! on who attends what. The HTML template escapes guest input.

use askama::Template;
use rsvp_core::config::{EventConfig, WeddingConfig};
use rsvp_core::model::record::declared_note;
use rsvp_core::model::{Attendance, RsvpRecord};

use crate::error::NotifyResult;

/// A rendered confirmation, ready to hand to a [`super::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub to_name: String,
    pub to_address: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

struct Attendee<'a> {
    name: &'a str,
    lines: Vec<String>,
}

struct EventBlock<'a> {
    title: &'a str,
    details: Vec<(&'static str, &'a str)>,
}

struct Summary<'a> {
    couple: String,
    guest: &'a str,
    attendees: Vec<Attendee<'a>>,
    events: Vec<EventBlock<'a>>,
    song: Option<&'a str>,
    message: Option<&'a str>,
    message_lines: Vec<&'a str>,
    wedding: &'a WeddingConfig,
}

#[derive(Template)]
#[template(path = "confirmation.txt")]
struct TextBody<'a> {
    summary: &'a Summary<'a>,
}

#[derive(Template)]
#[template(path = "confirmation.html")]
struct HtmlBody<'a> {
    summary: &'a Summary<'a>,
}

fn with_note(title: &str, meal: &str, note: Option<&str>) -> String {
    match declared_note(note) {
        Some(note) => format!("{title} ({meal} dietary note: {note})"),
        None => title.to_string(),
    }
}

fn attendee_lines(attendance: &Attendance, wedding: &WeddingConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if attendance.church {
        lines.push(with_note(
            &wedding.ceremony.title,
            "lunch",
            attendance.lunch_dietary.as_deref(),
        ));
    }
    if attendance.reception {
        lines.push(with_note(
            &wedding.reception.title,
            "dinner",
            attendance.dinner_dietary.as_deref(),
        ));
    }
    if lines.is_empty() {
        lines.push("Not attending".to_string());
    }
    lines
}

impl<'a> EventBlock<'a> {
    /// Venue, address and time, skipping the ones left blank.
    fn new(event: &'a EventConfig) -> Self {
        let details = [
            ("Venue", event.venue.as_str()),
            ("Address", event.address.as_str()),
            ("Time", event.time.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();

        Self {
            title: &event.title,
            details,
        }
    }
}

impl<'a> Summary<'a> {
    fn new(record: &'a RsvpRecord, wedding: &'a WeddingConfig) -> Self {
        let mut attendees = vec![Attendee {
            name: &record.full_name,
            lines: attendee_lines(&record.you, wedding),
        }];
        if let Some(companion) = &record.plus_one {
            attendees.push(Attendee {
                name: &companion.name,
                lines: attendee_lines(&companion.attendance, wedding),
            });
        }

        let mut events = Vec::new();
        if record.church_guest_count().0 > 0 {
            events.push(EventBlock::new(&wedding.ceremony));
        }
        if record.reception_guest_count().0 > 0 {
            events.push(EventBlock::new(&wedding.reception));
        }

        let message = record.message.as_deref();
        Self {
            couple: format!("{} & {}", wedding.bride, wedding.groom),
            guest: &record.full_name,
            attendees,
            events,
            song: record.song.as_deref(),
            message,
            message_lines: message.map(|m| m.split('\n').collect()).unwrap_or_default(),
            wedding,
        }
    }

    fn contact_line(&self) -> String {
        match &self.wedding.contact_phone {
            Some(phone) => format!("{} or {phone}", self.wedding.contact_email),
            None => self.wedding.contact_email.clone(),
        }
    }
}

/// ## Summary
/// Renders the confirmation for a sanitized record.
///
/// Venue blocks are included only for events at least one party attends.
/// Song and message blocks are included only when the guest filled them in.
///
/// ## Errors
/// Returns `TemplateError` if either body fails to render.
pub fn render_confirmation(
    record: &RsvpRecord,
    wedding: &WeddingConfig,
) -> NotifyResult<Confirmation> {
    let summary = Summary::new(record, wedding);

    Ok(Confirmation {
        to_name: record.full_name.clone(),
        to_address: record.email.clone(),
        subject: format!("RSVP Confirmation - {}'s Wedding", summary.couple),
        html: HtmlBody { summary: &summary }.render()?,
        text: TextBody { summary: &summary }.render()?,
    })
}
