use crate::db::schema;
use crate::error::DbError;
use diesel::{pg::Pg, prelude::*};
use rsvp_core::model::{HeaderStyle, SheetLayout};

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::sheet)]
#[diesel(check_for_backend(Pg))]
#[diesel(primary_key(name))]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub header_bold: bool,
    pub header_background: String,
    pub header_foreground: String,
    pub frozen_rows: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<Sheet> for SheetLayout {
    type Error = DbError;

    fn try_from(sheet: Sheet) -> Result<Self, Self::Error> {
        Ok(Self {
            frozen_rows: u32::try_from(sheet.frozen_rows)
                .map_err(|e| DbError::InvalidRow(format!("frozen_rows: {e}")))?,
            name: sheet.name,
            header: sheet.header,
            style: HeaderStyle {
                bold: sheet.header_bold,
                background: sheet.header_background,
                foreground: sheet.header_foreground,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::sheet)]
pub struct NewSheet<'a> {
    pub name: &'a str,
    pub header: &'a [String],
    pub header_bold: bool,
    pub header_background: &'a str,
    pub header_foreground: &'a str,
    pub frozen_rows: i32,
}

impl<'a> TryFrom<&'a SheetLayout> for NewSheet<'a> {
    type Error = DbError;

    fn try_from(layout: &'a SheetLayout) -> Result<Self, Self::Error> {
        Ok(Self {
            name: &layout.name,
            header: &layout.header,
            header_bold: layout.style.bold,
            header_background: &layout.style.background,
            header_foreground: &layout.style.foreground,
            frozen_rows: i32::try_from(layout.frozen_rows)
                .map_err(|e| DbError::InvalidRow(format!("frozen_rows: {e}")))?,
        })
    }
}

/// One appended record. Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::sheet_row)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(Sheet, foreign_key = sheet_name))]
pub struct SheetRow {
    pub id: i64,
    pub sheet_name: String,
    pub cells: Vec<String>,
    pub appended_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::sheet_row)]
pub struct NewSheetRow<'a> {
    pub sheet_name: &'a str,
    pub cells: &'a [String],
    pub appended_at: chrono::DateTime<chrono::Utc>,
}
