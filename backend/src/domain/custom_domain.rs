//! Custom domain records and their validated building blocks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;
use super::validation::{is_valid_domain_name, DOMAIN_NAME_MAX, DOMAIN_NAME_MIN};

/// Validation errors for [`DomainId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainIdValidationError {
    /// The identifier is not a valid UUID.
    #[error("domain id must be a valid UUID")]
    Invalid,
}

/// Opaque identifier of a custom domain record. Assigned at creation,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(Uuid);

impl DomainId {
    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, DomainIdValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainIdValidationError::Invalid)
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

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`DomainName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainNameValidationError {
    /// Shorter than [`DOMAIN_NAME_MIN`] characters.
    #[error("domain name must be at least {DOMAIN_NAME_MIN} characters")]
    TooShort,
    /// Longer than [`DOMAIN_NAME_MAX`] characters.
    #[error("domain name must be at most {DOMAIN_NAME_MAX} characters")]
    TooLong,
    /// Does not match the hostname pattern.
    #[error("Invalid domain format. Example: example.com")]
    InvalidFormat,
}

/// A syntactically valid custom domain name.
///
/// Uniqueness is owner-scoped and exact-match; no case folding is applied
/// here, so `Example.com` and `example.com` are distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Validate and construct a domain name.
    pub fn parse(raw: &str) -> Result<Self, DomainNameValidationError> {
        if raw.len() < DOMAIN_NAME_MIN {
            return Err(DomainNameValidationError::TooShort);
        }
        if raw.len() > DOMAIN_NAME_MAX {
            return Err(DomainNameValidationError::TooLong);
        }
        if !is_valid_domain_name(raw) {
            return Err(DomainNameValidationError::InvalidFormat);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the validated name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

/// Verification state of a custom domain.
///
/// Transitions are driven by the external verification subsystem; the
/// registry only records and displays the value. New records start as
/// [`DomainStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainStatus {
    /// The domain is verified and serving content.
    Active,
    /// Awaiting verification.
    Pending,
    /// Verification failed.
    Error,
}

impl DomainStatus {
    /// Stable wire representation (`ACTIVE`, `PENDING`, `ERROR`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Error => "ERROR",
        }
    }

    /// Parse the wire representation, returning `None` for unknown values.
    pub fn from_str_opt(raw: &str) -> Option<Self> {
        match raw {
            "ACTIVE" => Some(Self::Active),
            "PENDING" => Some(Self::Pending),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom domain owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDomain {
    /// Opaque record identifier.
    pub id: DomainId,
    /// Owning user; never changes after creation.
    pub owner_id: UserId,
    /// Domain name, unique within the owner's records.
    pub name: DomainName,
    /// Verification status, maintained externally.
    pub status: DomainStatus,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CustomDomain {
    /// Build a fresh pending record for `owner` with a generated id.
    pub fn new_pending(owner_id: UserId, name: DomainName) -> Self {
        let now = Utc::now();
        Self {
            id: DomainId::random(),
            owner_id,
            name,
            status: DomainStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
