//! Direct-to-storage upload protocol: intent validation and presigning.
//!
//! The allow-list below is the source of truth for accepted content types;
//! upload forms must advertise the same set. Violations are rejected with the
//! exact reason strings the boundary endpoint returns to clients.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{PresignService, SignedUrlError, SignedUrlIssuer};

/// Content types accepted by the presign boundary.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["application/pdf", "application/zip", "text/html"];

/// Upload size ceiling: 100 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Validity window of an issued write URL, in seconds. A PUT started after
/// this window fails and must not be retried with the same URL.
pub const PRESIGN_TTL: u64 = 60;

/// Ephemeral description of a pending upload. Never persisted; discarded
/// once the presigned URL has been consumed, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadIntent {
    /// Object key, already prefixed with the target subdomain
    /// (`{subdomain}/{originalFileName}`).
    pub file_name: String,
    /// MIME type reported for the file.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: u64,
}

/// Compose the object key for a file published under a subdomain.
pub fn object_key(subdomain: &str, file_name: &str) -> String {
    format!("{subdomain}/{file_name}")
}

/// A write-capable URL valid for [`PRESIGN_TTL`] seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUpload {
    /// The URL to PUT the raw file bytes to, exactly once.
    pub url: String,
}

/// Rejections produced while presigning. The `Display` strings are the wire
/// contract of the boundary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresignError {
    /// Content type outside [`ALLOWED_CONTENT_TYPES`].
    #[error("File type not allowed")]
    TypeNotAllowed,
    /// File larger than [`MAX_UPLOAD_BYTES`].
    #[error("File size exceeds the 100 MB limit")]
    TooLarge,
    /// The signer failed; detail goes to tracing, not to the client.
    #[error("Failed to generate URL")]
    Issuer,
}

/// Presigning use case backed by a [`SignedUrlIssuer`].
#[derive(Clone)]
pub struct PresignServiceImpl<S> {
    issuer: Arc<S>,
}

impl<S> PresignServiceImpl<S> {
    /// Create the service with the given issuer adapter.
    pub fn new(issuer: Arc<S>) -> Self {
        Self { issuer }
    }
}

fn validate_intent(intent: &UploadIntent) -> Result<(), PresignError> {
    if !ALLOWED_CONTENT_TYPES.contains(&intent.file_type.as_str()) {
        return Err(PresignError::TypeNotAllowed);
    }
    if intent.file_size > MAX_UPLOAD_BYTES {
        return Err(PresignError::TooLarge);
    }
    Ok(())
}

#[async_trait]
impl<S> PresignService for PresignServiceImpl<S>
where
    S: SignedUrlIssuer,
{
    async fn presign(&self, intent: UploadIntent) -> Result<PresignedUpload, PresignError> {
        validate_intent(&intent)?;

        let url = self
            .issuer
            .issue_put_url(&intent.file_name, &intent.file_type, PRESIGN_TTL)
            .await
            .map_err(|err| {
                let SignedUrlError::Issue { message } = err;
                warn!(key = %intent.file_name, error = %message, "signed URL issuance failed");
                PresignError::Issuer
            })?;

        info!(key = %intent.file_name, size = intent.file_size, "issued presigned upload URL");
        Ok(PresignedUpload { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureSignedUrlIssuer, MockSignedUrlIssuer};
    use rstest::rstest;

    fn intent(file_type: &str, file_size: u64) -> UploadIntent {
        UploadIntent {
            file_name: object_key("acme", "report.pdf"),
            file_type: file_type.to_owned(),
            file_size,
        }
    }

    #[rstest]
    fn object_key_prefixes_subdomain() {
        assert_eq!(object_key("acme", "report.pdf"), "acme/report.pdf");
    }

    #[tokio::test]
    async fn accepts_pdf_within_size_limit() {
        let service = PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer));
        let upload = service
            .presign(intent("application/pdf", 2_000_000))
            .await
            .expect("presign succeeds");
        assert!(upload.url.contains("acme/report.pdf"));
    }

    #[tokio::test]
    async fn rejects_disallowed_type_without_calling_issuer() {
        let mut issuer = MockSignedUrlIssuer::new();
        issuer.expect_issue_put_url().times(0);
        let service = PresignServiceImpl::new(Arc::new(issuer));

        let err = service
            .presign(intent("application/x-msdownload", 1_000))
            .await
            .expect_err("type rejected");
        assert_eq!(err, PresignError::TypeNotAllowed);
        assert_eq!(err.to_string(), "File type not allowed");
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let service = PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer));
        let err = service
            .presign(intent("application/zip", 150_000_000))
            .await
            .expect_err("size rejected");
        assert_eq!(err, PresignError::TooLarge);
        assert_eq!(err.to_string(), "File size exceeds the 100 MB limit");
    }

    #[tokio::test]
    async fn boundary_size_is_accepted() {
        let service = PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer));
        service
            .presign(intent("text/html", MAX_UPLOAD_BYTES))
            .await
            .expect("exactly the ceiling is allowed");
    }

    #[tokio::test]
    async fn issuer_failure_maps_to_generic_message() {
        let mut issuer = MockSignedUrlIssuer::new();
        issuer
            .expect_issue_put_url()
            .times(1)
            .return_once(|_, _, _| Err(SignedUrlError::issue("bucket missing")));
        let service = PresignServiceImpl::new(Arc::new(issuer));

        let err = service
            .presign(intent("application/pdf", 1_000))
            .await
            .expect_err("issuer failed");
        assert_eq!(err.to_string(), "Failed to generate URL");
    }
}
