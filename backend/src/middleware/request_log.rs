//! Per-request access log.
//!
//! Emits one `handled request` event per request carrying the method, the
//! request target as the client sent it and the final status code. The status
//! is read from the finished response, or from the error's response mapping
//! when the inner service fails, so the bytes written to the client are
//! unchanged.

use actix_web::{Error, HttpMessage};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use async_trait::async_trait;
use tracing::info;

use super::chain::{Middleware, Next};
use super::trailing_slash::RequestTarget;
use crate::domain::TraceId;

/// Logs every request after the rest of the chain has answered it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLog;

fn final_status(outcome: &Result<ServiceResponse<BoxBody>, Error>) -> StatusCode {
    match outcome {
        Ok(res) => res.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

// Normalisation may already have run when this middleware sits inside it.
fn request_summary(req: &ServiceRequest) -> String {
    match req.extensions().get::<RequestTarget>() {
        Some(RequestTarget(target)) => format!("{} {target}", req.method()),
        None => format!("{} {}", req.method(), req.uri()),
    }
}

#[async_trait(?Send)]
impl Middleware for RequestLog {
    async fn handle(
        &self,
        req: ServiceRequest,
        next: Next,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let summary = request_summary(&req);
        let outcome = next.call(req).await;
        let status = final_status(&outcome);
        match TraceId::current() {
            Some(trace_id) => info!(
                req = %summary,
                status = status.as_u16(),
                %trace_id,
                "handled request"
            ),
            None => info!(req = %summary, status = status.as_u16(), "handled request"),
        }
        outcome
    }
}
