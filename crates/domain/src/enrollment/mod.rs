//! Enrollment form, record and status types.

mod form;
mod record;
mod status;

pub use form::{EnrollmentForm, ValidatedEnrollment};
pub use record::EnrollmentRecord;
pub use status::EnrollmentStatus;
