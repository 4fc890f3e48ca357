//! Server-side RSVP pipeline: admission of a submission and the
//! confirmation email that follows it.

pub mod error;
pub mod ingress;
pub mod notify;
