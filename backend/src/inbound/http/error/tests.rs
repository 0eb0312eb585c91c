//! Tests for HTTP error mapping.

use super::*;
use crate::inbound::http::response::INTERNAL_ERROR_MESSAGE;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn render(error: &ApiError) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[rstest]
#[case(ApiError::not_found("user not found"), StatusCode::NOT_FOUND)]
#[case(ApiError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_variant(#[case] err: ApiError, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), expected);
}

#[rstest]
#[actix_web::test]
async fn not_found_renders_errors_envelope() {
    let (status, body) = render(&ApiError::not_found("user not found")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"errors": ["user not found"]}));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let (status, body) = render(&ApiError::internal("pq: relation users missing")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": INTERNAL_ERROR_MESSAGE}));
}

#[rstest]
#[case(UserPersistenceError::connection("refused"))]
#[case(UserPersistenceError::query("syntax"))]
#[case(UserPersistenceError::conflict("duplicate"))]
fn persistence_errors_become_internal(#[case] err: UserPersistenceError) {
    assert!(matches!(ApiError::from(err), ApiError::Internal { .. }));
}
