//! Cross-crate integration tests for the wedding RSVP service.

mod helpers;

mod http_client;
mod postgres;
mod rate_limit;
mod submission;
