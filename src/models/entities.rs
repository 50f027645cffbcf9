// file: src/models/entities.rs
// description: extracted entity result model and verification states
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Link,
    Email,
    Phone,
    Address,
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Link => "link",
            EntityCategory::Email => "email",
            EntityCategory::Phone => "phone",
            EntityCategory::Address => "address",
        }
    }
}

/// Tri-state human verification status for one extracted value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    #[default]
    Unchecked,
    Working,
    NotWorking,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Unchecked => "unchecked",
            VerificationStatus::Working => "working",
            VerificationStatus::NotWorking => "not-working",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unchecked" => Some(VerificationStatus::Unchecked),
            "working" => Some(VerificationStatus::Working),
            "not-working" => Some(VerificationStatus::NotWorking),
            _ => None,
        }
    }
}

/// One extraction result. Links, emails and phones are in scan order with
/// duplicates retained; addresses are unique. Every list carries its length
/// as a count, held by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub links: Vec<String>,
    pub links_count: usize,
    pub emails: Vec<String>,
    pub emails_count: usize,
    pub phones: Vec<String>,
    pub phones_count: usize,
    pub addresses: Vec<String>,
    pub addresses_count: usize,
}

impl ExtractedEntities {
    pub fn new(
        links: Vec<String>,
        emails: Vec<String>,
        phones: Vec<String>,
        addresses: Vec<String>,
    ) -> Self {
        Self {
            links_count: links.len(),
            emails_count: emails.len(),
            phones_count: phones.len(),
            addresses_count: addresses.len(),
            links,
            emails,
            phones,
            addresses,
        }
    }

    pub fn total(&self) -> usize {
        self.links_count + self.emails_count + self.phones_count + self.addresses_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_set_by_constructor() {
        let entities = ExtractedEntities::new(
            vec!["https://a.org/x".to_string()],
            vec![],
            vec!["555-123-4567".to_string(), "555-123-4567".to_string()],
            vec!["123 Main Street".to_string()],
        );

        assert_eq!(entities.links_count, 1);
        assert_eq!(entities.emails_count, 0);
        assert_eq!(entities.phones_count, 2);
        assert_eq!(entities.addresses_count, 1);
        assert_eq!(entities.total(), 4);
        assert!(!entities.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        let entities = ExtractedEntities::default();
        assert!(entities.is_empty());
        assert_eq!(entities.total(), 0);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VerificationStatus::Unchecked,
            VerificationStatus::Working,
            VerificationStatus::NotWorking,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VerificationStatus::parse("broken"), None);
    }
}
