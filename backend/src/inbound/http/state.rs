//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DomainAvailability, DomainRegistry, DomainVerification, PresignService, UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Custom domain CRUD use cases.
    pub domains: Arc<dyn DomainRegistry>,
    /// Presigned upload issuance.
    pub uploads: Arc<dyn PresignService>,
    /// DNS TXT ownership verification.
    pub verification: Arc<dyn DomainVerification>,
    /// Registry availability lookups.
    pub availability: Arc<dyn DomainAvailability>,
    /// Login email to user id resolution.
    pub users: Arc<dyn UserDirectory>,
}
