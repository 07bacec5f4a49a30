//! Object storage adapters.

mod s3_presigner;

pub use s3_presigner::S3Presigner;
