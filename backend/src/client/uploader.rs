//! Two-step uploader: request a presigned URL, then PUT the bytes to it.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{object_key, UploadIntent};

const PRESIGN_PATH: &str = "/api/v1/uploads/presign";

/// Failures in the upload flow.
#[derive(Debug, Error)]
pub enum UploadClientError {
    /// The backend rejected the file; `message` is the backend's reason
    /// string, suitable for showing to the user as-is.
    #[error("{message}")]
    Rejected { message: String },
    /// The request never completed or returned an unreadable body.
    #[error("upload transport error: {message}")]
    Transport { message: String },
}

impl UploadClientError {
    fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Description of a file about to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Deserialize)]
struct PresignOk {
    url: String,
}

#[derive(Deserialize)]
struct PresignRejected {
    error: String,
}

/// Client for the presign-then-PUT upload flow.
///
/// The backend only ever sees file metadata; the bytes go straight to
/// storage via the presigned URL. A presigned URL is good for one PUT within
/// its 60 second window, so a failed PUT means requesting a fresh URL, not
/// retrying the old one.
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    /// Client against the given backend base URL (no trailing slash).
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// Ask the backend for a presigned URL for `meta`, to be stored under
    /// `subdomain`. Rejections carry the backend's reason string.
    ///
    /// # Errors
    /// [`UploadClientError::Rejected`] when the backend refuses the file;
    /// [`UploadClientError::Transport`] when the request itself fails.
    pub async fn request_upload_url(
        &self,
        subdomain: &str,
        meta: &UploadMeta,
    ) -> Result<String, UploadClientError> {
        let intent = UploadIntent {
            file_name: object_key(subdomain, &meta.file_name),
            file_type: meta.content_type.clone(),
            file_size: meta.size,
        };
        let response = self
            .http
            .post(format!("{}{PRESIGN_PATH}", self.base_url))
            .json(&intent)
            .send()
            .await
            .map_err(|err| UploadClientError::transport(err.to_string()))?;

        if response.status().is_success() {
            let body: PresignOk = response
                .json()
                .await
                .map_err(|err| UploadClientError::transport(err.to_string()))?;
            return Ok(body.url);
        }

        let status = response.status();
        match response.json::<PresignRejected>().await {
            Ok(body) => {
                debug!(%status, reason = %body.error, "presign request rejected");
                Err(UploadClientError::Rejected {
                    message: body.error,
                })
            }
            Err(err) => Err(UploadClientError::transport(format!(
                "presign failed with status {status}: {err}"
            ))),
        }
    }

    /// PUT the file bytes to a presigned URL. One attempt, no retries.
    ///
    /// # Errors
    /// [`UploadClientError::Rejected`] when storage answers with a non-success
    /// status; [`UploadClientError::Transport`] when the PUT never completes.
    pub async fn upload_to_url(
        &self,
        url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), UploadClientError> {
        let response = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| UploadClientError::transport(err.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(UploadClientError::Rejected {
                message: format!("storage rejected the upload with status {}", response.status()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn base_url_loses_trailing_slashes() {
        let client = UploadClient::new(reqwest::Client::new(), "http://localhost:8080///");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[rstest]
    fn rejected_errors_display_the_backend_reason_verbatim() {
        let err = UploadClientError::Rejected {
            message: "File type not allowed".to_owned(),
        };
        assert_eq!(err.to_string(), "File type not allowed");
    }

    #[rstest]
    fn intent_keys_follow_the_wire_names() {
        let intent = UploadIntent {
            file_name: object_key("acme", "report.pdf"),
            file_type: "application/pdf".to_owned(),
            file_size: 1024,
        };
        let value = serde_json::to_value(&intent).expect("serialize");
        assert_eq!(value["fileName"], "acme/report.pdf");
        assert_eq!(value["fileType"], "application/pdf");
        assert_eq!(value["fileSize"], 1024);
    }
}
