//! Domainr-backed [`DomainStatusProvider`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{AvailabilityLookupError, DomainStatusProvider};

const STATUS_ENDPOINT: &str = "https://api.domainr.com/v2/status";

/// Adapter querying the Domainr `v2/status` API. One GET per lookup, with
/// the domain and the `client_id` credential as query parameters.
#[derive(Clone)]
pub struct DomainrClient {
    http: reqwest::Client,
    client_id: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: Vec<StatusEntry>,
}

#[derive(Deserialize)]
struct StatusEntry {
    status: String,
}

impl DomainrClient {
    /// Build a client with the given API credential.
    pub fn new(http: reqwest::Client, client_id: impl Into<String>) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            endpoint: STATUS_ENDPOINT.to_owned(),
        }
    }

    /// Point the client at a different endpoint, mainly for tests against a
    /// local stand-in.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl DomainStatusProvider for DomainrClient {
    async fn domain_status(&self, domain: &str) -> Result<String, AvailabilityLookupError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("domain", domain), ("client_id", self.client_id.as_str())])
            .send()
            .await
            .map_err(|err| AvailabilityLookupError::lookup(domain, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvailabilityLookupError::lookup(
                domain,
                format!("status endpoint answered {status}"),
            ));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|err| AvailabilityLookupError::lookup(domain, err.to_string()))?;
        let entry = body
            .status
            .into_iter()
            .next()
            .ok_or_else(|| AvailabilityLookupError::lookup(domain, "empty status list"))?;
        debug!(domain, status = %entry.status, "registry status lookup completed");
        Ok(entry.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn response_shape_matches_the_status_api() {
        let body: StatusResponse = serde_json::from_value(serde_json::json!({
            "status": [
                { "domain": "example.com", "zone": "com", "status": "active", "summary": "active" }
            ]
        }))
        .expect("deserialize");
        assert_eq!(body.status[0].status, "active");
    }

    #[rstest]
    fn endpoint_override_is_applied() {
        let client = DomainrClient::new(reqwest::Client::new(), "key")
            .with_endpoint("http://127.0.0.1:9/v2/status");
        assert_eq!(client.endpoint, "http://127.0.0.1:9/v2/status");
    }
}
