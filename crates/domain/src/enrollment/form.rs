use common::ContactNumber;
use serde::Deserialize;

use crate::error::DomainError;

/// Raw enrollment form as submitted by the client.
///
/// Every field is optional at this stage so that missing fields surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentForm {
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub course: Option<String>,
}

/// An enrollment form whose required fields are all present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEnrollment {
    pub name: String,
    pub contact: ContactNumber,
    pub course: String,
}

impl EnrollmentForm {
    /// Creates a fully populated form.
    pub fn new(
        name: impl Into<String>,
        whatsapp: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            whatsapp: Some(whatsapp.into()),
            course: Some(course.into()),
        }
    }

    /// Checks that `name`, `whatsapp` and `course` are present and non-blank.
    ///
    /// Values are trimmed. The error lists every missing field.
    pub fn validate(&self) -> Result<ValidatedEnrollment, DomainError> {
        let name = non_blank(&self.name);
        let whatsapp = non_blank(&self.whatsapp);
        let course = non_blank(&self.course);

        match (name, whatsapp, course) {
            (Some(name), Some(whatsapp), Some(course)) => Ok(ValidatedEnrollment {
                name: name.to_string(),
                contact: ContactNumber::new(whatsapp),
                course: course.to_string(),
            }),
            (name, whatsapp, course) => {
                let missing: Vec<&str> = [("name", name), ("whatsapp", whatsapp), ("course", course)]
                    .into_iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(field, _)| field)
                    .collect();
                Err(DomainError::Validation(format!(
                    "missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
