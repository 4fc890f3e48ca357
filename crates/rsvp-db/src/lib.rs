//! Persistence for accepted RSVPs and the rate-limit log.
//!
//! Both live behind [`db::RsvpStore`]: a Postgres implementation on top of a
//! bb8 pool and an in-process [`db::memory::MemoryStore`].

pub mod db;
pub mod error;
pub mod model;
