//! DNS TXT domain-ownership verification.
//!
//! Proves control of a domain by looking for a verification token in its TXT
//! records. Lookup failures are deliberately non-fatal: the caller sees "not
//! verified" rather than an error, and the detail lands in tracing output.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::custom_domain::DomainName;
use super::ports::{DomainVerification, TxtRecordResolver};

/// Verification use case backed by a [`TxtRecordResolver`].
#[derive(Clone)]
pub struct DomainVerificationImpl<D> {
    resolver: Arc<D>,
}

impl<D> DomainVerificationImpl<D> {
    /// Create the service with the given resolver adapter.
    pub fn new(resolver: Arc<D>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl<D> DomainVerification for DomainVerificationImpl<D>
where
    D: TxtRecordResolver,
{
    async fn verify(&self, domain: &DomainName, token: &str) -> bool {
        let records = match self.resolver.lookup_txt(domain.as_str()).await {
            Ok(records) => records,
            Err(err) => {
                warn!(domain = %domain, error = %err, "TXT lookup failed; treating as unverified");
                return false;
            }
        };

        let verified = records.iter().any(|record| record.contains(token));
        debug!(domain = %domain, verified, "TXT record verification completed");
        verified
    }
}
