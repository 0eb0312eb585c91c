//! Serves the generated OpenAPI document.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use super::response::respond_json;
use crate::doc::ApiDoc;

/// Serve the OpenAPI document for every registered route as JSON.
#[get("/docs/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    respond_json(&ApiDoc::openapi(), StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[actix_web::test]
    async fn document_lists_every_route() {
        let app = actix_test::init_service(App::new().service(openapi_json)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/docs/openapi.json").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let doc: Value = actix_test::read_body_json(res).await;
        let paths = doc["paths"].as_object().expect("paths object");
        for path in ["/", "/users", "/users/{id}"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        let user = &doc["components"]["schemas"]["User"]["properties"];
        assert!(user.get("id").is_some());
    }
}
