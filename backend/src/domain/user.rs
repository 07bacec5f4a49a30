//! User identity primitives.
//!
//! The registry never reads ambient session state; every operation takes an
//! explicit [`UserId`] for the acting user. [`Email`] is the login handle and
//! is normalised to lowercase so lookups are case-insensitive.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::validation::is_valid_email;

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdValidationError {
    /// The identifier is not a valid UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, UserIdValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdValidationError::Invalid)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailValidationError {
    /// The candidate does not look like `local@domain.tld`.
    #[error("Please enter a valid email address.")]
    Invalid,
}

/// A syntactically valid email address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        if !is_valid_email(raw) {
            return Err(EmailValidationError::Invalid);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_id_round_trips_through_string() {
        let id = UserId::random();
        let parsed = UserId::parse(&id.to_string()).expect("round trip");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn user_id_rejects_non_uuid_input() {
        assert_eq!(
            UserId::parse("not-a-uuid"),
            Err(UserIdValidationError::Invalid)
        );
    }

    #[rstest]
    fn email_normalises_to_lowercase() {
        let email = Email::parse("Ada@Example.COM").expect("valid email");
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[rstest]
    fn email_rejects_missing_at_sign() {
        assert_eq!(
            Email::parse("ada.example.com"),
            Err(EmailValidationError::Invalid)
        );
    }
}
