use chrono::{DateTime, Utc};
use common::{ContactNumber, Reference};
use serde::{Deserialize, Serialize};

use super::form::ValidatedEnrollment;
use super::status::EnrollmentStatus;
use crate::error::DomainError;

/// A persisted enrollment awaiting or having received payment confirmation.
///
/// Serialized as `{reference, name, whatsapp, course, status}` plus optional
/// timestamps, which are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub reference: Reference,
    pub name: String,
    #[serde(rename = "whatsapp")]
    pub contact: ContactNumber,
    pub course: String,
    pub status: EnrollmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl EnrollmentRecord {
    /// Creates a new pending record for a validated enrollment.
    pub fn pending(reference: Reference, enrollment: ValidatedEnrollment) -> Self {
        Self {
            reference,
            name: enrollment.name,
            contact: enrollment.contact,
            course: enrollment.course,
            status: EnrollmentStatus::Pending,
            created_at: Some(Utc::now()),
            completed_at: None,
        }
    }

    /// Returns true if the record is still awaiting payment.
    pub fn is_pending(&self) -> bool {
        self.status == EnrollmentStatus::Pending
    }

    /// Transitions the record from pending to completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.status.can_complete() {
            return Err(DomainError::AlreadyCompleted(self.reference.clone()));
        }
        self.status = EnrollmentStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}
