//! HTTP adapter mapping for handler failures.
//!
//! Purpose: let handlers propagate failures with `?` while guaranteeing that
//! domain errors render the `{"errors": [...]}` envelope and everything else
//! renders the fixed internal error body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use super::response::{AppError, respond_internal_error, respond_json};
use crate::domain::ports::UserPersistenceError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure raised by an HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("not found: {}", .errors.join("; "))]
    NotFound {
        /// Messages returned to the client.
        errors: Vec<String>,
    },
    /// Anything the client cannot act on. The message is logged, never sent.
    #[error("internal error: {message}")]
    Internal {
        /// Server-side detail.
        message: String,
    },
}

impl ApiError {
    /// Not found with a single message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            errors: vec![message.into()],
        }
    }

    /// Internal failure carrying a log-only message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<UserPersistenceError> for ApiError {
    fn from(err: UserPersistenceError) -> Self {
        error!(error = %err, "user repository call failed");
        Self::internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::NotFound { errors } => respond_json(
                &AppError {
                    errors: errors.clone(),
                },
                self.status_code(),
            ),
            Self::Internal { .. } => respond_internal_error(),
        }
    }
}

#[cfg(test)]
mod tests;
