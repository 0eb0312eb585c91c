//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! All statements go through Diesel's query builder, so every value is bound
//! as a parameter. Reads select `id`, `name` and `email`; the password column
//! is write-only and never loaded.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{GeneratedUserRow, NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from))
    }

    async fn find_or_create_user(
        &self,
        candidate: &User,
    ) -> Result<(User, bool), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            id: candidate.id().as_ref(),
            name: candidate.name(),
            email: candidate.email(),
        };

        // An `Err` from the closure rolls the transaction back; only the
        // insert path has anything to undo.
        let outcome: Result<(UserRow, bool), diesel::result::Error> = conn
            .transaction(|conn| {
                async move {
                    let existing: Option<UserRow> = users::table
                        .filter(users::id.eq(new_row.id))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if let Some(row) = existing {
                        return Ok((row, false));
                    }

                    diesel::insert_into(users::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    let stored: UserRow = users::table
                        .filter(users::id.eq(new_row.id))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await?;
                    Ok((stored, true))
                }
                .scope_boxed()
            })
            .await;
        let (row, created) = outcome.map_err(map_diesel_error)?;

        if created {
            debug!(user_id = %candidate.id(), "user created by find_or_create_user");
        }
        Ok((User::from(row), created))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: String = diesel::insert_into(users::table)
            .values(&GeneratedUserRow {
                name: &user.name,
                email: &user.email,
            })
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(user.clone().into_user(UserId::new(id)))
    }

    async fn update(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(users::table.filter(users::id.eq(user.id().as_ref())))
            .set(&UserUpdate {
                name: user.name(),
                email: user.email(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Ok(None);
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(users::table.filter(users::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }
}
