//! Port abstraction for user persistence adapters and their errors.
//!
//! Absence is part of the contract rather than an error: lookups return
//! `Ok(None)` when nothing matches, `update` returns `Ok(None)` for an unknown
//! id and `delete` returns `Ok(false)`. Errors are reserved for infrastructure
//! failures so inbound adapters can map them without inspecting messages.
//!
//! Every method is an `async fn`; dropping the returned future abandons the
//! in-flight operation.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Capability set every user store must provide.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user; an empty store yields an empty vector.
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Return the user with `candidate`'s id, inserting `candidate` first when
    /// no such user exists. The flag reports whether an insert happened.
    ///
    /// Implementations must perform the lookup and insert atomically.
    async fn find_or_create_user(
        &self,
        candidate: &User,
    ) -> Result<(User, bool), UserPersistenceError>;

    /// Insert a new user and return it with its assigned identifier.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite name and email of the user with `user`'s id.
    ///
    /// Returns `None` when no user has that id.
    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, reporting whether a row was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
