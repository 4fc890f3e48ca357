pub mod envelope;
pub mod field;
pub mod record;
pub mod sheet;

pub use envelope::{Envelope, EnvelopeStatus};
pub use field::RecordField;
pub use record::{Answer, Attendance, GuestCount, Relation, RsvpRecord, RsvpSubmission};
pub use sheet::{HeaderStyle, SheetLayout};
