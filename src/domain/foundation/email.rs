//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maximum length of an address per RFC 5321.
const MAX_EMAIL_LEN: usize = 254;

/// A syntactically plausible, normalized email address.
///
/// Normalization trims surrounding whitespace and lowercases the address so
/// that lookups by email (orders by contact, users by login) are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and normalizes an email address.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim().to_lowercase();

        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if value.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::length_out_of_range(
                "email",
                3,
                MAX_EMAIL_LEN,
                value.len(),
            ));
        }

        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @ symbol"))?;

        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed local part"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) if !host.is_empty() && !tld.is_empty() => {}
            _ => return Err(ValidationError::invalid_format("email", "malformed domain")),
        }

        Ok(Self(value))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let email = Email::parse("  Asha.K@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "asha.k@example.com");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(
            Email::parse("   "),
            Err(ValidationError::empty_field("email"))
        );
    }

    #[test]
    fn parse_rejects_missing_at() {
        assert!(Email::parse("asha.example.com").is_err());
    }

    #[test]
    fn parse_rejects_double_at() {
        assert!(Email::parse("a@b@example.com").is_err());
    }

    #[test]
    fn parse_rejects_domain_without_dot() {
        assert!(Email::parse("asha@localhost").is_err());
        assert!(Email::parse("asha@example.").is_err());
    }

    #[test]
    fn parse_rejects_inner_whitespace() {
        assert!(Email::parse("as ha@example.com").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Email, _> = serde_json::from_str("\"a@b.co\"");
        assert!(ok.is_ok());

        let bad: Result<Email, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
