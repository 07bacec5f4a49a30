//! Domain types and services.
//!
//! Everything in this module is transport agnostic. Inbound adapters map
//! [`Error`] values to HTTP responses; outbound adapters implement the traits
//! in [`ports`].

pub mod availability;
pub mod custom_domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod upload;
pub mod user;
pub mod validation;
pub mod verification;

pub use self::availability::DomainAvailabilityImpl;
pub use self::custom_domain::{
    CustomDomain, DomainId, DomainIdValidationError, DomainName, DomainNameValidationError,
    DomainStatus,
};
pub use self::error::{Error, ErrorCode};
pub use self::ports::{DomainAvailability, DomainRegistry, DomainVerification, PresignService};
pub use self::registry::DomainRegistryImpl;
pub use self::upload::{
    object_key, PresignError, PresignServiceImpl, PresignedUpload, UploadIntent, MAX_UPLOAD_BYTES,
    PRESIGN_TTL,
};
pub use self::user::{Email, EmailValidationError, UserId, UserIdValidationError};
pub use self::verification::DomainVerificationImpl;

/// Result alias used throughout the domain services.
pub type DomainResult<T> = Result<T, Error>;
