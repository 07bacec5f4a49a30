//! S3-backed [`SignedUrlIssuer`].

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::domain::ports::{SignedUrlError, SignedUrlIssuer};

/// Issues time-limited `PUT` URLs against a single S3 bucket. The caller
/// uploads straight to storage; no file bytes pass through this service.
#[derive(Clone)]
pub struct S3Presigner {
    client: Client,
    bucket: String,
}

impl S3Presigner {
    /// Build a presigner from the ambient AWS configuration (environment
    /// credentials, region, and endpoint overrides all apply).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    /// Build a presigner around an existing client, mainly for tests against
    /// a local S3 stand-in.
    pub fn with_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl SignedUrlIssuer for S3Presigner {
    async fn issue_put_url(
        &self,
        key: &str,
        content_type: &str,
        ttl_secs: u64,
    ) -> Result<String, SignedUrlError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|err| SignedUrlError::issue(err.to_string()))?;
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|err| SignedUrlError::issue(err.to_string()))?;
        debug!(bucket = %self.bucket, key, ttl_secs, "issued presigned upload URL");
        Ok(request.uri().to_string())
    }
}
