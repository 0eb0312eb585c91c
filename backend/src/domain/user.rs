//! User data model.
//!
//! A user is always an administrator in the context of this service. The
//! password is write-only: it may be supplied on deserialisation but is never
//! serialised back to clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum allowed length for a user name, in UTF-8 bytes.
pub const NAME_MIN: usize = 3;
/// Minimum allowed length for an email address, in UTF-8 bytes.
pub const EMAIL_MIN: usize = 5;

/// Validation failures reported by [`User::validate`] and [`NewUser::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// The name is shorter than [`NAME_MIN`].
    NameTooShort,
    /// The email is shorter than [`EMAIL_MIN`].
    EmailTooShort,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "name: invalid length"),
            Self::EmailTooShort => write!(f, "email: invalid length"),
        }
    }
}

impl std::error::Error for UserValidationError {}

fn validate_fields(name: &str, email: &str) -> Vec<UserValidationError> {
    let mut errors = Vec::new();
    if name.len() < NAME_MIN {
        errors.push(UserValidationError::NameTooShort);
    }
    if email.len() < EMAIL_MIN {
        errors.push(UserValidationError::EmailTooShort);
    }
    errors
}

/// Stable user identifier.
///
/// Identifiers are opaque strings assigned by the store (or supplied by the
/// caller of `find_or_create_user`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is fixed once assigned; there is no setter.
/// - `password` is never serialised.
///
/// # Examples
/// ```
/// use admin_api::domain::{User, UserId};
///
/// let user = User::new(UserId::new("1"), "Mack", "mack@acme.com").with_password("strong");
/// let json = serde_json::to_value(&user).expect("serialise user");
/// assert!(json.get("password").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = String, example = "1")]
    id: UserId,
    #[schema(example = "Mack")]
    name: String,
    #[schema(example = "mack@acme.com")]
    email: String,
    #[serde(default, skip_serializing)]
    #[schema(write_only)]
    password: String,
}

impl User {
    /// Build a user with an empty password.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: String::new(),
        }
    }

    /// Attach a password to the user.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address, used as an alternate lookup key.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Write-only password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Report every field that violates its length constraint.
    pub fn validate(&self) -> Vec<UserValidationError> {
        validate_fields(&self.name, &self.email)
    }
}

/// Candidate for a user that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Write-only secret; defaults to empty.
    #[serde(default)]
    pub password: String,
}

impl NewUser {
    /// Build a candidate from its parts.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: String::new(),
        }
    }

    /// Report every field that violates its length constraint.
    pub fn validate(&self) -> Vec<UserValidationError> {
        validate_fields(&self.name, &self.email)
    }

    /// Promote the candidate to a stored user once the store assigned an id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}
