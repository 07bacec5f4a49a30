//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe what the domain expects from adapters (the domain
//! store, the object-storage signer, the DNS resolver); driving ports are the
//! use-case traits HTTP handlers call. Each trait exposes strongly typed
//! errors so adapters map failures into predictable variants.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::custom_domain::{CustomDomain, DomainId, DomainName};
use super::upload::{PresignError, PresignedUpload, UploadIntent};
use super::user::{Email, UserId};
use super::Error;

/// Failures surfaced by [`DomainRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainRepositoryError {
    /// Store connectivity failure.
    #[error("domain store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("domain store query failed: {message}")]
    Query { message: String },
    /// The store's owner-scoped uniqueness constraint rejected the write.
    /// This is the authoritative guard behind the service's fast-path check.
    #[error("domain name already exists for this owner")]
    DuplicateName,
}

impl DomainRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for custom domain records.
///
/// Uniqueness of `(owner_id, name)` must be enforced by the adapter's
/// backing store; the service-level duplicate check is a fast path only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// All domains belonging to `owner`, in store order.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CustomDomain>, DomainRepositoryError>;

    /// Fetch a single record by identifier.
    async fn find_by_id(
        &self,
        id: &DomainId,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError>;

    /// Fetch the record matching `owner` and `name` exactly, if any.
    async fn find_by_owner_and_name(
        &self,
        owner: &UserId,
        name: &DomainName,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError>;

    /// Persist a new record.
    async fn insert(&self, domain: &CustomDomain) -> Result<(), DomainRepositoryError>;

    /// Rename an existing record and return the updated row.
    async fn update_name(
        &self,
        id: &DomainId,
        name: &DomainName,
    ) -> Result<CustomDomain, DomainRepositoryError>;

    /// Delete a record permanently.
    async fn delete(&self, id: &DomainId) -> Result<(), DomainRepositoryError>;
}

/// Failures surfaced by [`UserDirectory`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// Store connectivity failure.
    #[error("user directory connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user directory query failed: {message}")]
    Query { message: String },
}

impl UserDirectoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Lookup port resolving login emails to stable user identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user id registered for `email`, creating the record on
    /// first sight.
    async fn find_or_create(&self, email: &Email) -> Result<UserId, UserDirectoryError>;
}

/// Failures surfaced by [`SignedUrlIssuer`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignedUrlError {
    /// The signer rejected the request or could not be reached.
    #[error("signed URL generation failed: {message}")]
    Issue { message: String },
}

impl SignedUrlError {
    /// Helper for signer failures.
    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }
}

/// Port issuing time-limited write URLs against the object store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignedUrlIssuer: Send + Sync {
    /// Issue a URL authorising exactly one PUT of `content_type` bytes to
    /// `key`, valid for `ttl_secs` seconds from issuance.
    async fn issue_put_url(
        &self,
        key: &str,
        content_type: &str,
        ttl_secs: u64,
    ) -> Result<String, SignedUrlError>;
}

/// Failures surfaced by [`TxtRecordResolver`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxtLookupError {
    /// The lookup could not be completed (NXDOMAIN, timeout, server error).
    #[error("TXT lookup for {domain} failed: {message}")]
    Lookup { domain: String, message: String },
}

impl TxtLookupError {
    /// Helper for lookup failures.
    pub fn lookup(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
        }
    }
}

/// DNS port returning the TXT records published for a domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TxtRecordResolver: Send + Sync {
    /// All TXT record strings currently resolvable for `domain`.
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, TxtLookupError>;
}

/// Failures surfaced by [`DomainStatusProvider`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityLookupError {
    /// The provider credential is missing from the configuration.
    #[error("domain availability API credential is not configured")]
    NotConfigured,
    /// The provider could not be reached or answered unusably.
    #[error("availability lookup for {domain} failed: {message}")]
    Lookup { domain: String, message: String },
}

impl AvailabilityLookupError {
    /// Helper for lookup failures.
    pub fn lookup(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
        }
    }
}

/// Registry-status port answering what state a domain is in at its registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainStatusProvider: Send + Sync {
    /// The registry status summary for `domain` (for example `active`,
    /// `undelegated`, `inactive`).
    async fn domain_status(&self, domain: &str) -> Result<String, AvailabilityLookupError>;
}

/// Driving port for the domain registry use cases.
#[async_trait]
pub trait DomainRegistry: Send + Sync {
    /// All domains owned by `owner`.
    async fn list(&self, owner: &UserId) -> Result<Vec<CustomDomain>, Error>;

    /// Register a new domain for `owner`.
    async fn add(&self, owner: &UserId, name: DomainName) -> Result<CustomDomain, Error>;

    /// Fetch a domain after confirming `acting_user` owns it.
    async fn fetch(&self, id: &DomainId, acting_user: &UserId) -> Result<CustomDomain, Error>;

    /// Rename a domain after ownership and uniqueness checks.
    async fn rename(
        &self,
        id: &DomainId,
        acting_user: &UserId,
        new_name: DomainName,
    ) -> Result<CustomDomain, Error>;

    /// Delete a domain after ownership checks. Deletion is terminal.
    async fn remove(&self, id: &DomainId, acting_user: &UserId) -> Result<(), Error>;
}

/// Driving port for presigned upload issuance.
#[async_trait]
pub trait PresignService: Send + Sync {
    /// Validate the intent against the allow-list and size ceiling, then
    /// issue a short-lived write URL for its object key.
    async fn presign(&self, intent: UploadIntent) -> Result<PresignedUpload, PresignError>;
}

/// Driving port for DNS TXT domain-ownership verification.
#[async_trait]
pub trait DomainVerification: Send + Sync {
    /// True iff any TXT record of `domain` contains `token`. Lookup failures
    /// degrade to `false`; this call never surfaces an error.
    async fn verify(&self, domain: &DomainName, token: &str) -> bool;
}

/// Driving port for registry availability lookups.
#[async_trait]
pub trait DomainAvailability: Send + Sync {
    /// Whether `name` can still be registered. Unlike TXT verification,
    /// provider failures surface as errors rather than `false`.
    async fn check(&self, name: &DomainName) -> Result<bool, Error>;
}

/// In-memory [`DomainRepository`] used when no database is configured and by
/// integration tests. Preserves insertion order per owner.
#[derive(Default)]
pub struct InMemoryDomainRepository {
    records: Mutex<Vec<CustomDomain>>,
}

impl InMemoryDomainRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Vec<CustomDomain>) -> T) -> T {
        let mut guard = self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

#[async_trait]
impl DomainRepository for InMemoryDomainRepository {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CustomDomain>, DomainRepositoryError> {
        Ok(self.with_records(|records| {
            records
                .iter()
                .filter(|d| &d.owner_id == owner)
                .cloned()
                .collect()
        }))
    }

    async fn find_by_id(
        &self,
        id: &DomainId,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError> {
        Ok(self.with_records(|records| records.iter().find(|d| &d.id == id).cloned()))
    }

    async fn find_by_owner_and_name(
        &self,
        owner: &UserId,
        name: &DomainName,
    ) -> Result<Option<CustomDomain>, DomainRepositoryError> {
        Ok(self.with_records(|records| {
            records
                .iter()
                .find(|d| &d.owner_id == owner && &d.name == name)
                .cloned()
        }))
    }

    async fn insert(&self, domain: &CustomDomain) -> Result<(), DomainRepositoryError> {
        self.with_records(|records| {
            if records
                .iter()
                .any(|d| d.owner_id == domain.owner_id && d.name == domain.name)
            {
                return Err(DomainRepositoryError::DuplicateName);
            }
            records.push(domain.clone());
            Ok(())
        })
    }

    async fn update_name(
        &self,
        id: &DomainId,
        name: &DomainName,
    ) -> Result<CustomDomain, DomainRepositoryError> {
        self.with_records(|records| {
            let owner = records
                .iter()
                .find(|d| &d.id == id)
                .map(|d| d.owner_id.clone())
                .ok_or_else(|| DomainRepositoryError::query("record not found"))?;
            if records
                .iter()
                .any(|d| d.owner_id == owner && &d.name == name && &d.id != id)
            {
                return Err(DomainRepositoryError::DuplicateName);
            }
            let record = records
                .iter_mut()
                .find(|d| &d.id == id)
                .ok_or_else(|| DomainRepositoryError::query("record not found"))?;
            record.name = name.clone();
            record.updated_at = chrono::Utc::now();
            Ok(record.clone())
        })
    }

    async fn delete(&self, id: &DomainId) -> Result<(), DomainRepositoryError> {
        self.with_records(|records| {
            records.retain(|d| &d.id != id);
            Ok(())
        })
    }
}

/// In-memory [`UserDirectory`] used when no database is configured and by
/// integration tests.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<Email, UserId>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_or_create(&self, email: &Email) -> Result<UserId, UserDirectoryError> {
        let mut guard = self
            .users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard
            .entry(email.clone())
            .or_insert_with(UserId::random)
            .clone())
    }
}

/// Deterministic [`SignedUrlIssuer`] for tests and storage-less deployments.
/// The returned URL is not write-capable; it only exercises the flow.
pub struct FixtureSignedUrlIssuer;

#[async_trait]
impl SignedUrlIssuer for FixtureSignedUrlIssuer {
    async fn issue_put_url(
        &self,
        key: &str,
        _content_type: &str,
        ttl_secs: u64,
    ) -> Result<String, SignedUrlError> {
        Ok(format!(
            "https://storage.invalid/{key}?X-Expires={ttl_secs}&X-Signature=fixture"
        ))
    }
}

/// [`TxtRecordResolver`] answering from a fixed record set; used by tests.
#[derive(Default)]
pub struct StaticTxtRecordResolver {
    records: HashMap<String, Vec<String>>,
}

impl StaticTxtRecordResolver {
    /// Build a resolver that answers `domain` with `records`.
    pub fn with_records(domain: impl Into<String>, records: Vec<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(domain.into(), records);
        Self { records: map }
    }
}

#[async_trait]
impl TxtRecordResolver for StaticTxtRecordResolver {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, TxtLookupError> {
        self.records
            .get(domain)
            .cloned()
            .ok_or_else(|| TxtLookupError::lookup(domain, "no records configured"))
    }
}

/// [`DomainStatusProvider`] answering from a fixed status map; used by tests
/// and credential-less deployments. The default (empty) provider reports the
/// missing credential, matching a server started without an API key.
#[derive(Default)]
pub struct StaticDomainStatusProvider {
    statuses: HashMap<String, String>,
}

impl StaticDomainStatusProvider {
    /// Build a provider that answers `domain` with `status`.
    pub fn with_status(domain: impl Into<String>, status: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(domain.into(), status.into());
        Self { statuses: map }
    }
}

#[async_trait]
impl DomainStatusProvider for StaticDomainStatusProvider {
    async fn domain_status(&self, domain: &str) -> Result<String, AvailabilityLookupError> {
        if self.statuses.is_empty() {
            return Err(AvailabilityLookupError::NotConfigured);
        }
        self.statuses
            .get(domain)
            .cloned()
            .ok_or_else(|| AvailabilityLookupError::lookup(domain, "no status configured"))
    }
}
