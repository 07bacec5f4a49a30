//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification covering the session
//! endpoints, the domain registry, the presign boundary, and the health
//! probes. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, UploadIntent};
use crate::inbound::http::domains::{
    AvailabilityResponse, DomainNameRequest, DomainResponse, VerifyRequest, VerifyResponse,
};
use crate::inbound::http::uploads::PresignResponse;
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Sitebox backend API",
        description = "HTTP interface for session login, custom domain management, \
                       and presigned direct-to-storage uploads."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::domains::list_domains,
        crate::inbound::http::domains::add_domain,
        crate::inbound::http::domains::check_availability,
        crate::inbound::http::domains::edit_domain,
        crate::inbound::http::domains::delete_domain,
        crate::inbound::http::domains::verify_domain,
        crate::inbound::http::uploads::presign_upload,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        LoginResponse,
        DomainResponse,
        DomainNameRequest,
        VerifyRequest,
        VerifyResponse,
        AvailabilityResponse,
        UploadIntent,
        PresignResponse,
    )),
    tags(
        (name = "users", description = "Session login and logout"),
        (name = "domains", description = "Custom domain management"),
        (name = "uploads", description = "Presigned upload URLs"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_the_domain_endpoints() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/login"));
        assert!(paths.contains_key("/api/v1/domains"));
        assert!(paths.contains_key("/api/v1/domains/availability"));
        assert!(paths.contains_key("/api/v1/domains/{id}"));
        assert!(paths.contains_key("/api/v1/domains/{id}/verify"));
        assert!(paths.contains_key("/api/v1/uploads/presign"));
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("Error"));
        assert!(schemas.contains_key("ErrorCode"));
    }
}
