//! End-to-end tests for the HTTP surface.
//!
//! These exercise the real handlers behind the real session middleware with
//! in-memory adapters, covering the login, domain management, verification,
//! and presign flows as a browser would drive them.

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use sitebox_backend::domain::ports::{
    FixtureSignedUrlIssuer, InMemoryDomainRepository, InMemoryUserDirectory,
    StaticDomainStatusProvider, StaticTxtRecordResolver,
};
use sitebox_backend::domain::{
    DomainAvailabilityImpl, DomainRegistryImpl, DomainVerificationImpl, PresignServiceImpl,
    MAX_UPLOAD_BYTES,
};
use sitebox_backend::inbound::http::domains::{
    add_domain, check_availability, delete_domain, edit_domain, list_domains, verify_domain,
};
use sitebox_backend::inbound::http::state::HttpState;
use sitebox_backend::inbound::http::uploads::presign_upload;
use sitebox_backend::inbound::http::users::{login, logout};
use sitebox_backend::Trace;

const VERIFY_TOKEN: &str = "sitebox-verify=3f9a";

fn fixture_state() -> HttpState {
    HttpState {
        domains: Arc::new(DomainRegistryImpl::new(Arc::new(
            InMemoryDomainRepository::new(),
        ))),
        uploads: Arc::new(PresignServiceImpl::new(Arc::new(FixtureSignedUrlIssuer))),
        verification: Arc::new(DomainVerificationImpl::new(Arc::new(
            StaticTxtRecordResolver::with_records("example.com", vec![VERIFY_TOKEN.to_owned()]),
        ))),
        availability: Arc::new(DomainAvailabilityImpl::new(Arc::new(
            StaticDomainStatusProvider::with_status("fresh-name.com", "undelegated"),
        ))),
        users: Arc::new(InMemoryUserDirectory::new()),
    }
}

fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(login)
                .service(logout)
                .service(list_domains)
                .service(add_domain)
                .service(check_availability)
                .service(edit_domain)
                .service(delete_domain)
                .service(verify_domain)
                .service(presign_upload),
        )
}

async fn sign_in(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn requests_without_a_session_are_unauthorized() {
    let app = test::init_service(build_app(fixture_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/domains").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn domain_lifecycle_round_trip() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/domains")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["name"], "example.com");
    assert_eq!(created["status"], "PENDING");
    let id = created["id"].as_str().expect("id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/domains")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/domains/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "name": "renamed.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let renamed: Value = test::read_body_json(res).await;
    assert_eq!(renamed["name"], "renamed.com");

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/domains/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/domains")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Value = test::read_body_json(res).await;
    assert!(listed.as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn duplicate_names_conflict_per_owner() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/domains")
                .cookie(cookie.clone())
                .set_json(json!({ "name": "example.com" }))
                .to_request(),
        )
        .await;
        if res.status() == StatusCode::CREATED {
            continue;
        }
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "You already have a domain with this name.");
        return;
    }
    panic!("second add should have conflicted");
}

#[actix_web::test]
async fn other_owners_can_reuse_a_name() {
    let app = test::init_service(build_app(fixture_state())).await;
    let ada = sign_in(&app, "ada@example.com").await;
    let grace = sign_in(&app, "grace@example.com").await;

    for cookie in [ada, grace] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/domains")
                .cookie(cookie)
                .set_json(json!({ "name": "example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}

#[actix_web::test]
async fn cross_owner_access_is_forbidden() {
    let app = test::init_service(build_app(fixture_state())).await;
    let ada = sign_in(&app, "ada@example.com").await;
    let grace = sign_in(&app, "grace@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/domains")
            .cookie(ada)
            .set_json(json!({ "name": "example.com" }))
            .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/domains/{id}"))
            .cookie(grace)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "You are not authorized to delete this domain.");
}

#[actix_web::test]
async fn malformed_domain_names_are_rejected() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/domains")
            .cookie(cookie)
            .set_json(json!({ "name": "no-tld" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid domain format. Example: example.com");
}

#[actix_web::test]
async fn verification_reports_token_presence() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/domains")
            .cookie(cookie.clone())
            .set_json(json!({ "name": "example.com" }))
            .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("id").to_owned();

    for (token, expected) in [(VERIFY_TOKEN, true), ("sitebox-verify=other", false)] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/domains/{id}/verify"))
                .cookie(cookie.clone())
                .set_json(json!({ "token": token }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["verified"], expected);
    }
}

#[actix_web::test]
async fn availability_reflects_the_registry_status() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/domains/availability?name=fresh-name.com")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["available"], true);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/domains/availability?name=no-tld")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid domain format. Example: example.com");
}

#[actix_web::test]
async fn presign_issues_a_url_for_allowed_files() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/uploads/presign")
            .cookie(cookie)
            .set_json(json!({
                "fileName": "acme/report.pdf",
                "fileType": "application/pdf",
                "fileSize": 2_000_000,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let url = body["url"].as_str().expect("url");
    assert!(url.contains("acme/report.pdf"));
}

#[actix_web::test]
async fn presign_rejections_use_the_error_key() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let cases = [
        (
            json!({ "fileName": "a/x.gif", "fileType": "image/gif", "fileSize": 10 }),
            "File type not allowed",
        ),
        (
            json!({
                "fileName": "a/big.zip",
                "fileType": "application/zip",
                "fileSize": MAX_UPLOAD_BYTES + 1,
            }),
            "File size exceeds the 100 MB limit",
        ),
    ];
    for (payload, message) in cases {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/uploads/presign")
                .cookie(cookie.clone())
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], message);
    }
}

#[actix_web::test]
async fn presign_requires_a_session() {
    let app = test::init_service(build_app(fixture_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/uploads/presign")
            .set_json(json!({
                "fileName": "acme/report.pdf",
                "fileType": "application/pdf",
                "fileSize": 100,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let app = test::init_service(build_app(fixture_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    // The purge response rewrites the cookie with an immediate expiry.
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("cleared session cookie");
    assert_eq!(cleared.value(), "");
}
