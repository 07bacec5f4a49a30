//! HTTP inbound adapter exposing the REST endpoints.

pub mod domains;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
pub mod uploads;
pub mod users;

pub use error::ApiResult;
