//! Ordered composition of request middleware.
//!
//! [`Chain`] wraps an application with a list of [`Middleware`] values so
//! that `Chain::new(vec![m1, m2, m3])` behaves as `m1(m2(m3(app)))`: the
//! first entry runs first on the way in and last on the way out.
//!
//! Each middleware receives the request and a [`Next`] handle. Awaiting
//! [`Next::call`] runs the rest of the chain and the wrapped service; code
//! before the call is the inbound half, code after it the outbound half.
//!
//! The chain holds `Rc` values, so build it inside the `HttpServer` factory
//! closure where each worker constructs its own `App`.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_service::ServiceExt;
use actix_service::boxed::{self, BoxService};
use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use async_trait::async_trait;
use futures_util::future::{LocalBoxFuture, Ready, ready};

type InnerService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, Error>;

/// A single link in a [`Chain`].
///
/// # Examples
/// ```
/// use actix_web::body::BoxBody;
/// use actix_web::dev::{ServiceRequest, ServiceResponse};
/// use admin_api::middleware::{Middleware, Next};
///
/// struct Noop;
///
/// #[async_trait::async_trait(?Send)]
/// impl Middleware for Noop {
///     async fn handle(
///         &self,
///         req: ServiceRequest,
///         next: Next,
///     ) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
///         next.call(req).await
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Middleware {
    /// Process `req`, delegating to `next` to run the remainder of the chain.
    async fn handle(
        &self,
        req: ServiceRequest,
        next: Next,
    ) -> Result<ServiceResponse<BoxBody>, Error>;
}

/// Handle to the remainder of a [`Chain`].
pub struct Next {
    middlewares: Rc<[Rc<dyn Middleware>]>,
    position: usize,
    service: Rc<InnerService>,
}

impl Next {
    /// Run the remaining middleware and then the wrapped service.
    pub async fn call(self, req: ServiceRequest) -> Result<ServiceResponse<BoxBody>, Error> {
        let Some(current) = self.middlewares.get(self.position).cloned() else {
            return self.service.call(req).await;
        };
        let rest = Self {
            middlewares: Rc::clone(&self.middlewares),
            position: self.position + 1,
            service: Rc::clone(&self.service),
        };
        current.handle(req, rest).await
    }
}

/// Transform applying an ordered list of middleware to an application.
///
/// # Examples
/// ```
/// use std::rc::Rc;
///
/// use actix_web::{App, HttpResponse, web};
/// use admin_api::middleware::{Chain, RequestLog, TrimTrailingSlash};
///
/// let app = App::new()
///     .wrap(Chain::new(vec![Rc::new(TrimTrailingSlash), Rc::new(RequestLog)]))
///     .route("/users", web::get().to(|| async { HttpResponse::Ok().finish() }));
/// ```
#[derive(Clone)]
pub struct Chain {
    middlewares: Rc<[Rc<dyn Middleware>]>,
}

impl Chain {
    /// Compose `middlewares`, outermost first.
    pub fn new(middlewares: Vec<Rc<dyn Middleware>>) -> Self {
        Self {
            middlewares: middlewares.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Chain
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ChainMiddleware;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let service = boxed::service(service.map(|res: ServiceResponse<B>| res.map_into_boxed_body()));
        ready(Ok(ChainMiddleware {
            middlewares: Rc::clone(&self.middlewares),
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`Chain`].
///
/// Applications should not use this type directly.
pub struct ChainMiddleware {
    middlewares: Rc<[Rc<dyn Middleware>]>,
    service: Rc<InnerService>,
}

impl Service<ServiceRequest> for ChainMiddleware {
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let next = Next {
            middlewares: Rc::clone(&self.middlewares),
            position: 0,
            service: Rc::clone(&self.service),
        };
        Box::pin(next.call(req))
    }
}
