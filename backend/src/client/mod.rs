//! HTTP client for the direct-to-storage upload flow.

mod uploader;

pub use uploader::{UploadClient, UploadClientError, UploadMeta};
