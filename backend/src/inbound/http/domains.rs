//! Custom domain management handlers.
//!
//! ```text
//! GET    /api/v1/domains
//! POST   /api/v1/domains            {"name":"example.com"}
//! GET    /api/v1/domains/availability?name=example.com
//! PATCH  /api/v1/domains/{id}       {"name":"renamed.com"}
//! DELETE /api/v1/domains/{id}
//! POST   /api/v1/domains/{id}/verify {"token":"sitebox-verify=..."}
//! ```
//!
//! Every handler extracts the acting user from the session and passes it
//! explicitly into the registry; errors come back as plain messages shown
//! verbatim in the dashboard forms.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{CustomDomain, DomainId, DomainName, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Wire representation of a custom domain record.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainResponse {
    /// Opaque record identifier.
    pub id: String,
    /// The domain name.
    #[schema(example = "example.com")]
    pub name: String,
    /// Verification status: `ACTIVE`, `PENDING`, or `ERROR`.
    #[schema(example = "PENDING")]
    pub status: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last modification timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<CustomDomain> for DomainResponse {
    fn from(value: CustomDomain) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            status: value.status.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Request body for adding or renaming a domain.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DomainNameRequest {
    /// The domain name to register or rename to.
    #[schema(example = "example.com")]
    pub name: String,
}

/// Request body for TXT verification.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VerifyRequest {
    /// Token expected to appear in one of the domain's TXT records.
    pub token: String,
}

/// Response body for TXT verification.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VerifyResponse {
    /// Whether the token was found.
    pub verified: bool,
}

/// Query parameters of the availability lookup.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvailabilityQuery {
    /// Candidate domain name to look up.
    pub name: String,
}

/// Response body of the availability lookup.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AvailabilityResponse {
    /// Whether the name can still be registered.
    pub available: bool,
}

fn parse_name(raw: &str) -> Result<DomainName, Error> {
    DomainName::parse(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "name", "value": raw }))
    })
}

fn parse_id(raw: &str) -> Result<DomainId, Error> {
    // An unparseable id cannot reference any record.
    DomainId::parse(raw).map_err(|_| Error::not_found("Domain not found."))
}

/// List the acting user's domains.
#[utoipa::path(
    get,
    path = "/api/v1/domains",
    responses(
        (status = 200, description = "Domains owned by the current user", body = [DomainResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["domains"],
    operation_id = "listDomains"
)]
#[get("/domains")]
pub async fn list_domains(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DomainResponse>>> {
    let user_id = session.require_user_id()?;
    let domains = state.domains.list(&user_id).await?;
    Ok(web::Json(
        domains.into_iter().map(DomainResponse::from).collect(),
    ))
}

/// Register a new domain for the acting user.
#[utoipa::path(
    post,
    path = "/api/v1/domains",
    request_body = DomainNameRequest,
    responses(
        (status = 201, description = "Domain registered", body = DomainResponse),
        (status = 400, description = "Invalid domain name", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Duplicate name for this owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["domains"],
    operation_id = "addDomain"
)]
#[post("/domains")]
pub async fn add_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DomainNameRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let name = parse_name(&payload.name)?;
    let domain = state.domains.add(&user_id, name).await?;
    Ok(HttpResponse::Created().json(DomainResponse::from(domain)))
}

/// Look up whether a candidate name can still be registered.
#[utoipa::path(
    get,
    path = "/api/v1/domains/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability of the candidate name", body = AvailabilityResponse),
        (status = 400, description = "Invalid domain name", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Lookup failed or not configured", body = Error)
    ),
    tags = ["domains"],
    operation_id = "checkAvailability"
)]
#[get("/domains/availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    session.require_user_id()?;
    let name = parse_name(&query.name)?;
    let available = state.availability.check(&name).await?;
    Ok(web::Json(AvailabilityResponse { available }))
}

/// Rename an existing domain.
#[utoipa::path(
    patch,
    path = "/api/v1/domains/{id}",
    request_body = DomainNameRequest,
    params(("id" = String, Path, description = "Domain record identifier")),
    responses(
        (status = 200, description = "Domain renamed", body = DomainResponse),
        (status = 400, description = "Invalid domain name", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such domain", body = Error),
        (status = 409, description = "Duplicate name for this owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["domains"],
    operation_id = "editDomain"
)]
#[patch("/domains/{id}")]
pub async fn edit_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<DomainNameRequest>,
) -> ApiResult<web::Json<DomainResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_id(&path)?;
    let name = parse_name(&payload.name)?;
    let domain = state.domains.rename(&id, &user_id, name).await?;
    Ok(web::Json(DomainResponse::from(domain)))
}

/// Delete a domain permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/domains/{id}",
    params(("id" = String, Path, description = "Domain record identifier")),
    responses(
        (status = 204, description = "Domain deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such domain", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["domains"],
    operation_id = "deleteDomain"
)]
#[delete("/domains/{id}")]
pub async fn delete_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_id(&path)?;
    state.domains.remove(&id, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Check the domain's TXT records for a verification token.
///
/// Best effort: lookup failures report `verified: false` rather than an
/// error. Status transitions stay with the external verification subsystem.
#[utoipa::path(
    post,
    path = "/api/v1/domains/{id}/verify",
    request_body = VerifyRequest,
    params(("id" = String, Path, description = "Domain record identifier")),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such domain", body = Error)
    ),
    tags = ["domains"],
    operation_id = "verifyDomain"
)]
#[post("/domains/{id}/verify")]
pub async fn verify_domain(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<web::Json<VerifyResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_id(&path)?;
    let domain = state.domains.fetch(&id, &user_id).await?;
    let verified = state
        .verification
        .verify(&domain.name, &payload.token)
        .await;
    Ok(web::Json(VerifyResponse { verified }))
}
