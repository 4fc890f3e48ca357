//! Guest-side RSVP flow.
//!
//! [`wizard::Wizard`] is a rendering-independent state machine driven by
//! intents; [`wizard::view::project`] turns its state into what a page should
//! show. [`session::RsvpSession`] couples the wizard to a [`transport::Transmit`]
//! implementation such as the HTTP [`transport::SubmissionClient`].

pub mod collect;
pub mod error;
pub mod session;
pub mod transport;
pub mod wizard;
