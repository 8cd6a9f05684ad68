//! Domain layer for the enrollment checkout service.
//!
//! This crate provides:
//! - `Money` amounts in BRL cents
//! - `CourseCatalog`, the static course code to price table
//! - `EnrollmentForm` validation into a `ValidatedEnrollment`
//! - `EnrollmentRecord` with its one-way `pending -> completed` lifecycle

pub mod course;
pub mod enrollment;
pub mod error;
pub mod money;

pub use common::{ContactNumber, Reference};
pub use course::CourseCatalog;
pub use enrollment::{EnrollmentForm, EnrollmentRecord, EnrollmentStatus, ValidatedEnrollment};
pub use error::DomainError;
pub use money::Money;
