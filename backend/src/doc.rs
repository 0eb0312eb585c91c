//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the admin routes and the JSON shapes they exchange.
//! The document is served at `/docs/openapi.json`, the path the home endpoint
//! advertises.

use utoipa::OpenApi;

use crate::domain::User;
use crate::inbound::http::home::HomeResponse;
use crate::inbound::http::response::{AppError, InternalError};

/// OpenAPI document for the admin REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin users API",
        description = "Read access to administrator user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
    ),
    components(schemas(User, HomeResponse, AppError, InternalError)),
    tags(
        (name = "home", description = "Service descriptor"),
        (name = "users", description = "Administrator user records")
    )
)]
pub struct ApiDoc;
