//! Configurable `UserRepository` double.
//!
//! Each operation is backed by an optional closure. Operations left
//! unconfigured fail with a query error naming the operation, so a test
//! notices when a handler reaches for something it was not meant to.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

type Result<T> = std::result::Result<T, UserPersistenceError>;
type Responder<Args, T> = Arc<dyn Fn(Args) -> Result<T> + Send + Sync>;

/// Repository whose behaviour is supplied per test.
///
/// ```ignore
/// use admin_api::domain::ports::UserRepository;
/// use admin_api::domain::UserId;
/// use admin_api::test_support::StubUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = StubUserRepository::new().with_get_all(|| Ok(Vec::new()));
/// assert!(repo.get_all().await.expect("configured").is_empty());
/// assert!(repo.delete(&UserId::new("1")).await.is_err());
/// # });
/// ```
#[derive(Clone, Default)]
pub struct StubUserRepository {
    get_all_fn: Option<Responder<(), Vec<User>>>,
    find_by_id_fn: Option<Responder<UserId, Option<User>>>,
    find_by_email_fn: Option<Responder<String, Option<User>>>,
    find_or_create_user_fn: Option<Responder<User, (User, bool)>>,
    create_fn: Option<Responder<NewUser, User>>,
    update_fn: Option<Responder<User, Option<User>>>,
    delete_fn: Option<Responder<UserId, bool>>,
}

impl StubUserRepository {
    /// Create a stub with every operation unconfigured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `get_all` with `f`.
    #[must_use]
    pub fn with_get_all(
        mut self,
        f: impl Fn() -> Result<Vec<User>> + Send + Sync + 'static,
    ) -> Self {
        self.get_all_fn = Some(Arc::new(move |()| f()));
        self
    }

    /// Answer `find_by_id` with `f`, which receives the requested id.
    #[must_use]
    pub fn with_find_by_id(
        mut self,
        f: impl Fn(UserId) -> Result<Option<User>> + Send + Sync + 'static,
    ) -> Self {
        self.find_by_id_fn = Some(Arc::new(f));
        self
    }

    /// Answer `find_by_email` with `f`, which receives the requested address.
    #[must_use]
    pub fn with_find_by_email(
        mut self,
        f: impl Fn(String) -> Result<Option<User>> + Send + Sync + 'static,
    ) -> Self {
        self.find_by_email_fn = Some(Arc::new(f));
        self
    }

    /// Answer `find_or_create_user` with `f`; the flag it returns reports
    /// whether the user was inserted.
    #[must_use]
    pub fn with_find_or_create_user(
        mut self,
        f: impl Fn(User) -> Result<(User, bool)> + Send + Sync + 'static,
    ) -> Self {
        self.find_or_create_user_fn = Some(Arc::new(f));
        self
    }

    /// Answer `create` with `f`, which must assign the identifier.
    #[must_use]
    pub fn with_create(
        mut self,
        f: impl Fn(NewUser) -> Result<User> + Send + Sync + 'static,
    ) -> Self {
        self.create_fn = Some(Arc::new(f));
        self
    }

    /// Answer `update` with `f`; return `Ok(None)` to report an unknown id.
    #[must_use]
    pub fn with_update(
        mut self,
        f: impl Fn(User) -> Result<Option<User>> + Send + Sync + 'static,
    ) -> Self {
        self.update_fn = Some(Arc::new(f));
        self
    }

    /// Answer `delete` with `f`; return `Ok(false)` when nothing was removed.
    #[must_use]
    pub fn with_delete(
        mut self,
        f: impl Fn(UserId) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.delete_fn = Some(Arc::new(f));
        self
    }
}

fn respond<Args, T>(responder: Option<&Responder<Args, T>>, args: Args, op: &str) -> Result<T> {
    match responder {
        Some(f) => f(args),
        None => Err(UserPersistenceError::query(format!(
            "{op} is not configured on this stub"
        ))),
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn get_all(&self) -> Result<Vec<User>> {
        respond(self.get_all_fn.as_ref(), (), "get_all")
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        respond(self.find_by_id_fn.as_ref(), id.clone(), "find_by_id")
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        respond(self.find_by_email_fn.as_ref(), email.to_owned(), "find_by_email")
    }

    async fn find_or_create_user(&self, candidate: &User) -> Result<(User, bool)> {
        respond(
            self.find_or_create_user_fn.as_ref(),
            candidate.clone(),
            "find_or_create_user",
        )
    }

    async fn create(&self, user: &NewUser) -> Result<User> {
        respond(self.create_fn.as_ref(), user.clone(), "create")
    }

    async fn update(&self, user: &User) -> Result<Option<User>> {
        respond(self.update_fn.as_ref(), user.clone(), "update")
    }

    async fn delete(&self, id: &UserId) -> Result<bool> {
        respond(self.delete_fn.as_ref(), id.clone(), "delete")
    }
}
