//! Trailing-slash normalisation.
//!
//! Rewrites `/users/` to `/users` before routing so both spellings reach the
//! same handler. The root path is left alone and the query string is kept.
//! The target as the client sent it is kept in the request extensions as a
//! [`RequestTarget`] so later middleware can report it.

use actix_web::{Error, HttpMessage};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::uri::{PathAndQuery, Uri};
use async_trait::async_trait;
use tracing::warn;

use super::chain::{Middleware, Next};

/// Strips trailing `/` characters from non-root request paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimTrailingSlash;

/// Request target before trimming; only present when the path was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget(pub Uri);

fn trimmed_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.len() == path.len() || trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

fn rewrite(uri: &Uri, path: &str) -> Result<Uri, Box<dyn std::error::Error>> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_owned(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

#[async_trait(?Send)]
impl Middleware for TrimTrailingSlash {
    async fn handle(
        &self,
        mut req: ServiceRequest,
        next: Next,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let rewritten = trimmed_path(req.path()).map(|path| rewrite(req.uri(), path));
        match rewritten {
            Some(Ok(uri)) => {
                req.match_info_mut().get_mut().update(&uri);
                let original = std::mem::replace(&mut req.head_mut().uri, uri);
                req.extensions_mut().insert(RequestTarget(original));
            }
            Some(Err(error)) => warn!(%error, uri = %req.uri(), "failed to trim trailing slash"),
            None => {}
        }
        next.call(req).await
    }
}
