//! Registry availability lookups for candidate domain names.
//!
//! A name counts as available when its registry status summary is exactly
//! `undelegated` or `inactive`. Provider failures are surfaced to the caller
//! as internal errors; there is no silent degradation here because a wrong
//! "available" answer would send the user to buy a taken name.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::custom_domain::DomainName;
use super::ports::{AvailabilityLookupError, DomainAvailability, DomainStatusProvider};
use super::Error;

const AVAILABLE_STATUSES: [&str; 2] = ["undelegated", "inactive"];

/// Availability use case backed by a [`DomainStatusProvider`].
#[derive(Clone)]
pub struct DomainAvailabilityImpl<P> {
    provider: Arc<P>,
}

impl<P> DomainAvailabilityImpl<P> {
    /// Create the service with the given status provider adapter.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> DomainAvailability for DomainAvailabilityImpl<P>
where
    P: DomainStatusProvider,
{
    async fn check(&self, name: &DomainName) -> Result<bool, Error> {
        let status = self
            .provider
            .domain_status(name.as_str())
            .await
            .map_err(|err| {
                error!(domain = %name, error = %err, "availability lookup failed");
                match err {
                    AvailabilityLookupError::NotConfigured => {
                        Error::internal("Domain availability checks are not configured.")
                    }
                    AvailabilityLookupError::Lookup { .. } => Error::internal(
                        "An unexpected error occurred while checking domain availability.",
                    ),
                }
            })?;

        let available = AVAILABLE_STATUSES.contains(&status.as_str());
        debug!(domain = %name, %status, available, "availability lookup completed");
        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StaticDomainStatusProvider;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn name(raw: &str) -> DomainName {
        DomainName::parse(raw).expect("valid fixture name")
    }

    fn service(provider: StaticDomainStatusProvider) -> DomainAvailabilityImpl<StaticDomainStatusProvider> {
        DomainAvailabilityImpl::new(Arc::new(provider))
    }

    #[rstest]
    #[case("undelegated", true)]
    #[case("inactive", true)]
    #[case("active", false)]
    #[case("marketed", false)]
    #[tokio::test]
    async fn status_summary_decides_availability(#[case] status: &str, #[case] expected: bool) {
        let service = service(StaticDomainStatusProvider::with_status("example.com", status));
        let available = service.check(&name("example.com")).await.expect("check");
        assert_eq!(available, expected);
    }

    #[tokio::test]
    async fn lookup_failure_is_an_internal_error() {
        let service = service(StaticDomainStatusProvider::with_status("other.com", "active"));
        let err = service
            .check(&name("example.com"))
            .await
            .expect_err("unknown domain errors");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(
            err.message(),
            "An unexpected error occurred while checking domain availability."
        );
    }

    #[tokio::test]
    async fn missing_credential_is_reported_as_such() {
        let service = service(StaticDomainStatusProvider::default());
        let err = service
            .check(&name("example.com"))
            .await
            .expect_err("no credential configured");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Domain availability checks are not configured.");
    }
}
