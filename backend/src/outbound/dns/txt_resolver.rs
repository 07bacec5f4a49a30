//! TXT record lookups via the system resolver.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use crate::domain::ports::{TxtLookupError, TxtRecordResolver};

/// Resolver adapter backed by hickory-dns. Each TXT record's character
/// strings are concatenated into one value, matching how registrars present
/// long verification tokens.
pub struct HickoryTxtResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// Build a resolver from the host's `/etc/resolv.conf`, falling back to
    /// public defaults when the system configuration cannot be read.
    pub fn from_system() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|err| {
            debug!(error = %err, "system resolver config unavailable; using defaults");
            TokioAsyncResolver::tokio(
                hickory_resolver::config::ResolverConfig::default(),
                hickory_resolver::config::ResolverOpts::default(),
            )
        });
        Self { resolver }
    }
}

#[async_trait]
impl TxtRecordResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, domain: &str) -> Result<Vec<String>, TxtLookupError> {
        let response = self
            .resolver
            .txt_lookup(domain)
            .await
            .map_err(|err| TxtLookupError::lookup(domain, err.to_string()))?;
        let records = response
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                    .collect::<String>()
            })
            .collect();
        Ok(records)
    }
}
