//! Users API handlers.
//!
//! ```text
//! GET /users       -> 200 [User]
//! GET /users/{id}  -> 200 User | 404 {"errors":["user not found"]}
//! ```
//!
//! Repository failures surface as 500 with the generic internal error body.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::error;

use super::error::{ApiError, ApiResult};
use super::response::{AppError, InternalError, respond_json};
use super::state::HttpState;
use crate::domain::{User, UserId};

/// Body of the 404 returned for an unknown id.
pub const USER_NOT_FOUND: &str = "user not found";

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = InternalError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.get_all().await?;
    Ok(respond_json(&users, StatusCode::OK))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No user has this id", body = AppError),
        (status = 500, description = "Internal server error", body = InternalError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    find_user(req.match_info().get("id"), &state).await
}

async fn find_user(id: Option<&str>, state: &HttpState) -> ApiResult<HttpResponse> {
    let Some(id) = id else {
        error!("could not read id route parameter in get_user");
        return Err(ApiError::internal("missing id route parameter"));
    };

    let user = state
        .users
        .find_by_id(&UserId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(respond_json(&user, StatusCode::OK))
}

/// Register the users routes on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users).service(get_user);
}
