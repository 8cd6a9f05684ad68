//! Enrollment status state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an enrollment record.
///
/// State transitions:
/// ```text
/// Pending ──► Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Checkout created, payment not yet confirmed.
    #[default]
    Pending,

    /// Payment confirmed and the enrollee notified (terminal state).
    Completed,
}

impl EnrollmentStatus {
    /// Returns true if the enrollment can be completed.
    pub fn can_complete(&self) -> bool {
        matches!(self, EnrollmentStatus::Pending)
    }

    /// Returns the status name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
