use crate::error::DbResult;
use crate::model::admission::{Admission, AdmissionOutcome};
use crate::model::rate_limit::RateLimitEntry;
use std::future::Future;
use std::pin::Pin;

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod query;
pub mod schema;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait DbProvider: Send + Sync {
    fn get_connection<'a>(&'a self) -> BoxFuture<'a, DbResult<connection::DbConnection<'a>>>;
}

/// ## Summary
/// Append-only storage for accepted RSVPs and the rate-limit log.
///
/// Implementations apply [`RsvpStore::admit`] atomically with respect to
/// other admissions for the same phone.
pub trait RsvpStore: Send + Sync {
    /// ## Summary
    /// Admits the row if the phone still has allowance in the window.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be reached or a write fails.
    fn admit<'a>(&'a self, admission: &'a Admission) -> BoxFuture<'a, DbResult<AdmissionOutcome>>;

    /// ## Summary
    /// Returns the sheet as written: the header row first, then the data rows
    /// in append order. A sheet that was never written is empty.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn rows<'a>(&'a self, sheet: &'a str) -> BoxFuture<'a, DbResult<Vec<Vec<String>>>>;

    /// ## Summary
    /// Returns the rate-limit entries currently logged for `phone`, oldest first.
    ///
    /// Expired entries linger until the next admission purges them.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn rate_limit_entries<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, DbResult<Vec<RateLimitEntry>>>;
}
