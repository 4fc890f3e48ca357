use serde::{Deserialize, Serialize};

use crate::constants::{HEADER_BACKGROUND, HEADER_FOREGROUND};
use crate::model::field::RecordField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStyle {
    pub bold: bool,
    pub background: String,
    pub foreground: String,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            bold: true,
            background: HEADER_BACKGROUND.to_string(),
            foreground: HEADER_FOREGROUND.to_string(),
        }
    }
}

/// ## Summary
/// Name, header row and header presentation of one sheet.
///
/// The header is written once, on the first append to an empty sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub name: String,
    pub header: Vec<String>,
    pub style: HeaderStyle,
    pub frozen_rows: u32,
}

impl SheetLayout {
    /// Layout of the guest-facing RSVP sheet.
    #[must_use]
    pub fn rsvp(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: RecordField::COLUMNS
                .iter()
                .map(|f| f.header().to_string())
                .collect(),
            style: HeaderStyle::default(),
            frozen_rows: 1,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }
}
