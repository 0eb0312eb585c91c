//! Request trace middleware.
//!
//! Each incoming request receives a UUID [`TraceId`] held in task-local
//! storage for the rest of the request and echoed in a `trace-id` response
//! header so clients can quote it when reporting problems.

use actix_web::Error;
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use async_trait::async_trait;
use tracing::error;

use super::chain::{Middleware, Next};
use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Opens a [`TraceId`] scope around the rest of the chain.
///
/// Place it first so every later middleware and handler can read
/// [`TraceId::current`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTrace;

#[async_trait(?Send)]
impl Middleware for RequestTrace {
    async fn handle(
        &self,
        req: ServiceRequest,
        next: Next,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let trace_id = TraceId::generate();
        let mut res = TraceId::scope(trace_id, next.call(req)).await?;
        match HeaderValue::from_str(&trace_id.to_string()) {
            Ok(value) => {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Err(error) => {
                error!(%error, %trace_id, "failed to encode trace identifier header");
            }
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::middleware::Chain;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    async fn call_traced<F, Fut, Res>(handler: F) -> (ServiceResponse<BoxBody>, String)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app = actix_test::init_service(
            App::new()
                .wrap(Chain::new(vec![Rc::new(RequestTrace)]))
                .route("/", web::get().to(handler)),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/").to_request();
        let res = actix_test::call_service(&app, req).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, trace_id)
    }

    #[rstest]
    #[actix_web::test]
    async fn adds_parseable_trace_id_header() {
        let (_, trace_id) = call_traced(|| async { HttpResponse::Ok().finish() }).await;
        assert!(trace_id.parse::<TraceId>().is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn exposes_trace_id_in_handler() {
        let (res, trace_id) = call_traced(|| async {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;

        let body = actix_test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[rstest]
    #[actix_web::test]
    async fn error_responses_carry_the_header() {
        let (res, _) = call_traced(|| async { HttpResponse::NotFound().finish() }).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
