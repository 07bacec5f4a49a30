//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ada@example.com"}
//! POST /api/v1/logout
//! ```
//!
//! Authentication providers (magic links, OAuth) live outside this service;
//! these handlers cover the session plumbing only: a syntactically valid
//! email resolves to a stable user id which is stored in the cookie session.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserDirectoryError;
use crate::domain::{Email, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address to sign in with.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Login response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Stable identifier of the signed-in user.
    pub user_id: String,
}

fn map_directory_error(err: &UserDirectoryError) -> Error {
    tracing::error!(error = %err, "user directory lookup failed");
    Error::internal("An unexpected error occurred while signing in.")
}

/// Establish a session for the given email address.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let email = Email::parse(&payload.email).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" }))
    })?;

    let user_id = state
        .users
        .find_or_create(&email)
        .await
        .map_err(|err| map_directory_error(&err))?;
    session.persist_user(&user_id)?;

    Ok(web::Json(LoginResponse {
        user_id: user_id.to_string(),
    }))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        FixtureSignedUrlIssuer, InMemoryDomainRepository, InMemoryUserDirectory,
        StaticDomainStatusProvider, StaticTxtRecordResolver,
    };
    use crate::domain::{
        DomainAvailabilityImpl, DomainRegistryImpl, DomainVerificationImpl, PresignServiceImpl,
    };
    use actix_session::storage::CookieSessionStore;
    use actix_session::SessionMiddleware;
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn state() -> HttpState {
        HttpState {
            domains: Arc::new(DomainRegistryImpl::new(Arc::new(
                InMemoryDomainRepository::new(),
            ))),
            uploads: Arc::new(PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer))),
            verification: Arc::new(DomainVerificationImpl::new(Arc::new(
                StaticTxtRecordResolver::default(),
            ))),
            availability: Arc::new(DomainAvailabilityImpl::new(Arc::new(
                StaticDomainStatusProvider::default(),
            ))),
            users: Arc::new(InMemoryUserDirectory::new()),
        }
    }

    #[actix_web::test]
    async fn login_sets_session_cookie() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .service(login),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(LoginRequest {
                    email: "ada@example.com".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.response().cookies().next().is_some());
    }

    #[actix_web::test]
    async fn login_rejects_malformed_email() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .service(login),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(LoginRequest {
                    email: "not-an-email".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
