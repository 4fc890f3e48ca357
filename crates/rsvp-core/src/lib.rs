//! Shared domain types for the wedding RSVP service.
//!
//! Everything here is free of I/O: configuration loading aside, the modules
//! describe the submitted record, how it is validated and sanitized, and the
//! sheet layout it is persisted under.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod sanitize;
pub mod validation;
