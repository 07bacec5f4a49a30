//! Domain-level error type.
//!
//! Errors carry a stable machine-readable code plus the exact message shown
//! to the user. Adapters translate them into protocol-specific envelopes; the
//! domain never formats HTTP status codes or leaks store internals into the
//! message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable category for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No authenticated user is present.
    Unauthorized,
    /// Authenticated but not permitted to touch this record.
    Forbidden,
    /// The record does not exist.
    NotFound,
    /// The mutation collides with existing state (duplicate name).
    Conflict,
    /// Unexpected failure in a store or provider.
    InternalError,
}

/// Error payload surfaced by domain services.
///
/// The `message` is user-displayable verbatim; internal detail belongs in
/// tracing output, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "You already have a domain with this name.")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Construct an error from a code and user-facing message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details (field name, rejected value) for clients.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Machine-readable category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// User-displayable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn codes_serialize_snake_case() {
        let value = serde_json::to_value(ErrorCode::InvalidRequest).expect("serialize");
        assert_eq!(value, json!("invalid_request"));
        let value = serde_json::to_value(ErrorCode::InternalError).expect("serialize");
        assert_eq!(value, json!("internal_error"));
    }

    #[rstest]
    fn details_are_omitted_when_absent() {
        let payload =
            serde_json::to_value(Error::not_found("Domain not found.")).expect("serialize");
        assert_eq!(
            payload,
            json!({ "code": "not_found", "message": "Domain not found." })
        );
    }

    #[rstest]
    fn details_round_trip() {
        let err = Error::invalid_request("Invalid domain format. Example: example.com")
            .with_details(json!({ "field": "name" }));
        assert_eq!(
            err.details().and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("name")
        );
        assert_eq!(err.to_string(), "Invalid domain format. Example: example.com");
    }
}
