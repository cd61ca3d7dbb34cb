//! Authentication service.
//!
//! Credential model for username/password accounts: lookup by username,
//! argon2id hashing, registration, and login.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use dvdrental_core::{Role, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{NewUser, User};

/// A validated self-registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub password: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Look up a user by exact username.
    ///
    /// A string that is not a valid username cannot exist, so it yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };
        Ok(self.users.get_by_username(&username).await?)
    }

    /// Register a new user through the public API.
    ///
    /// Only [`Role::User`] accounts can be self-registered; admins are
    /// created with the CLI. An existing username is never modified.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RoleNotAllowed` if an admin role was requested.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        if registration.role.is_admin() {
            return Err(AuthError::RoleNotAllowed(registration.role));
        }

        self.create_user(registration).await
    }

    /// Create a user with any role. Used by operator tooling.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn create_user(&self, registration: Registration) -> Result<User, AuthError> {
        if self
            .users
            .get_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UserAlreadyExists(
                registration.username.into_inner(),
            ));
        }

        let password_hash = hash_password(&registration.password)?;
        let new_user = NewUser {
            username: registration.username,
            password_hash,
            role: registration.role,
            first_name: registration.first_name,
            last_name: registration.last_name,
        };

        // A concurrent registration can still win between lookup and insert.
        self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AuthError::UserAlreadyExists(new_user.username.as_str().to_owned())
            }
            other => AuthError::Repository(other),
        })
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown username and for
    /// a wrong password alike.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A malformed hash never verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
