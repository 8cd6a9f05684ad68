use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation token linking an enrollment record to a payment-provider transaction.
///
/// Freshly generated references are UUID v7 strings: a millisecond timestamp
/// prefix followed by random bits, so two references generated in the same
/// millisecond still differ. Any string is accepted when reading stored
/// records, since older documents used bare millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Generates a new time-ordered reference.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing reference value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Reference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A phone-number-like contact string, kept exactly as the enrollee typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Creates a contact number from raw user input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the contact as originally entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the ASCII digits of the contact, in order.
    pub fn digits(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl std::fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContactNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContactNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_references_are_unique() {
        let refs: std::collections::HashSet<Reference> =
            (0..1000).map(|_| Reference::generate()).collect();
        assert_eq!(refs.len(), 1000);
    }

    #[test]
    fn reference_accepts_legacy_timestamps() {
        let r: Reference = serde_json::from_str("\"1717171717171\"").unwrap();
        assert_eq!(r.as_str(), "1717171717171");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"1717171717171\"");
    }

    #[test]
    fn contact_digits_strips_formatting() {
        let contact = ContactNumber::new("+55 (11) 99999-9999");
        assert_eq!(contact.digits(), "5511999999999");
        assert_eq!(contact.as_str(), "+55 (11) 99999-9999");
    }

    #[test]
    fn contact_digits_empty_when_no_digits() {
        assert_eq!(ContactNumber::new("n/a").digits(), "");
    }
}
