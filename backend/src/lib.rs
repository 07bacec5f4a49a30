//! Backend library for the sitebox file-hosting dashboard.
//!
//! The crate follows a hexagonal layout: `domain` holds transport-agnostic
//! types, services, and ports; `inbound` exposes the HTTP adapter; `outbound`
//! implements the driven ports (PostgreSQL persistence, S3 presigning, DNS
//! lookups); `client` consumes the presign boundary endpoint from the caller
//! side.

pub mod client;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::Trace;
