//! Wedding RSVP service - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one `rsvp_test::` path.

pub use rsvp_app as app;
pub use rsvp_client as client;
pub use rsvp_core as domain;
pub use rsvp_db as db;
pub use rsvp_service as service;
