//! Normalisation of pool and Diesel failures into `UserPersistenceError`.
//!
//! Every error leaving the Diesel adapter passes through these functions so
//! callers see one error shape regardless of the driver's error format.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to the port's error taxonomy.
///
/// Unique violations become [`UserPersistenceError::Conflict`]; a lost
/// connection becomes [`UserPersistenceError::Connection`]; everything else
/// is a query failure.
pub(crate) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::conflict("user already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::RollbackTransaction | DieselError::RollbackErrorOnCommit { .. } => {
            UserPersistenceError::query("transaction failed")
        }
        _ => UserPersistenceError::query("database error"),
    }
}
