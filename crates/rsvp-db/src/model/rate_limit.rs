use crate::db::schema;
use diesel::{pg::Pg, prelude::*};

/// One accepted submission in the rate-limit log.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = schema::rate_limiting)]
#[diesel(check_for_backend(Pg))]
pub struct RateLimitEntry {
    pub id: i64,
    pub phone: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::rate_limiting)]
pub struct NewRateLimitEntry<'a> {
    pub phone: &'a str,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub count: i32,
}

impl<'a> NewRateLimitEntry<'a> {
    #[must_use]
    pub const fn single(phone: &'a str, submitted_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            phone,
            submitted_at,
            count: 1,
        }
    }
}
