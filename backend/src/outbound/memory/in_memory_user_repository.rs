//! `UserRepository` backed by an in-process map.
//!
//! Users are kept in a `BTreeMap` keyed by id so `get_all` returns them in the
//! same order as the Diesel adapter. Each operation holds the lock for its
//! whole duration, which makes `find_or_create_user` atomic.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

/// In-memory implementation of the `UserRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `users`.
    ///
    /// Later entries replace earlier ones with the same id.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn find_or_create_user(
        &self,
        candidate: &User,
    ) -> Result<(User, bool), UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if let Some(existing) = users.get(candidate.id()) {
            return Ok((existing.clone(), false));
        }
        users.insert(candidate.id().clone(), candidate.clone());
        Ok((candidate.clone(), true))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let created = user.clone().into_user(UserId::new(Uuid::new_v4().to_string()));
        users.insert(created.id().clone(), created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let Some(stored) = users.get_mut(user.id()) else {
            return Ok(None);
        };
        let password = stored.password().to_owned();
        *stored = User::new(user.id().clone(), user.name(), user.email()).with_password(password);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        Ok(users.remove(id).is_some())
    }
}
