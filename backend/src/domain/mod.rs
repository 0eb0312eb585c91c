//! Domain primitives and ports.
//!
//! Purpose: define the user entity and the persistence contract shared by the
//! HTTP adapter and the storage adapters. Nothing here depends on actix or
//! Diesel.
//!
//! Public surface:
//! - User, NewUser, UserId: the administrator entity and its identifier.
//! - TraceId: request-scoped correlation identifier.
//! - ports: the `UserRepository` contract and its error type.

pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::trace_id::TraceId;
pub use self::user::{EMAIL_MIN, NAME_MIN, NewUser, User, UserId, UserValidationError};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
