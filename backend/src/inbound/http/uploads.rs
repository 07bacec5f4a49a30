//! Presign boundary endpoint.
//!
//! ```text
//! POST /api/v1/uploads/presign {"fileName":"acme/report.pdf","fileType":"application/pdf","fileSize":2000000}
//! ```
//!
//! This endpoint keeps the original wire contract of the upload flow: the
//! success body is `{"url": ...}` and failures are `{"error": ...}` with the
//! exact reason strings, rather than the standard error envelope used by the
//! rest of the API. The upload client surfaces those strings verbatim.

use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::domain::{PresignError, UploadIntent};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Success body of the presign endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PresignResponse {
    /// Write-capable URL, valid for 60 seconds, good for exactly one PUT.
    pub url: String,
}

fn rejection(status: actix_web::http::StatusCode, reason: &PresignError) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": reason.to_string() }))
}

/// Issue a presigned upload URL for a pending file publish.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/presign",
    request_body = UploadIntent,
    responses(
        (status = 200, description = "Presigned URL issued", body = PresignResponse),
        (status = 400, description = "File type not allowed, or file too large"),
        (status = 401, description = "Unauthorised"),
        (status = 500, description = "Failed to generate URL")
    ),
    tags = ["uploads"],
    operation_id = "presignUpload"
)]
#[post("/uploads/presign")]
pub async fn presign_upload(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UploadIntent>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;

    match state.uploads.presign(payload.into_inner()).await {
        Ok(upload) => Ok(HttpResponse::Ok().json(PresignResponse { url: upload.url })),
        Err(reason @ (PresignError::TypeNotAllowed | PresignError::TooLarge)) => Ok(rejection(
            actix_web::http::StatusCode::BAD_REQUEST,
            &reason,
        )),
        Err(reason @ PresignError::Issuer) => Ok(rejection(
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            &reason,
        )),
    }
}
