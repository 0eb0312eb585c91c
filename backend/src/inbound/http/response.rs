//! Uniform JSON response writers.
//!
//! Success bodies are the raw resource. Domain failures use the
//! [`AppError`] envelope `{"errors": [...]}`; anything unclassified becomes
//! the fixed [`InternalError`] body so no internal detail reaches clients.
//! Every JSON response carries `Content-Type: application/json; charset=utf-8`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Content type set on every JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Message returned for every unclassified server failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Oops! Something went wrong on our side.";

/// Envelope for domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppError {
    /// One message per failure.
    pub errors: Vec<String>,
}

/// Envelope for unclassified internal errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InternalError {
    /// Always [`INTERNAL_ERROR_MESSAGE`].
    pub message: String,
}

/// Serialise `data` as the body of a `status` response.
///
/// Encoding failures are logged and answered with [`respond_internal_error`].
pub fn respond_json<T: Serialize + ?Sized>(data: &T, status: StatusCode) -> HttpResponse {
    match serde_json::to_vec(data) {
        Ok(body) => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, JSON_CONTENT_TYPE))
            .body(body),
        Err(err) => {
            error!(error = %err, "failed to encode JSON response");
            respond_internal_error()
        }
    }
}

/// Respond 500 with the generic internal error body.
pub fn respond_internal_error() -> HttpResponse {
    let body = serde_json::to_vec(&InternalError {
        message: INTERNAL_ERROR_MESSAGE.to_owned(),
    })
    .unwrap_or_default();
    HttpResponse::InternalServerError()
        .insert_header((CONTENT_TYPE, JSON_CONTENT_TYPE))
        .body(body)
}

/// Respond with `status` and an empty body.
pub fn respond_no_content(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).finish()
}
