//! Service descriptor served at the root path.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};
use serde::Serialize;
use utoipa::ToSchema;

use super::response::respond_json;

/// Version reported by the home endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Path of the generated OpenAPI document.
pub const DOCS_ENDPOINT: &str = "/docs/openapi.json";

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    /// API version.
    pub version: String,
    /// Where the OpenAPI document is served.
    pub docs_endpoint: String,
}

/// Describe the API version and where its documentation lives.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API descriptor", body = HomeResponse)),
    tags = ["home"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> HttpResponse {
    respond_json(
        &HomeResponse {
            version: API_VERSION.to_owned(),
            docs_endpoint: DOCS_ENDPOINT.to_owned(),
        },
        StatusCode::OK,
    )
}
