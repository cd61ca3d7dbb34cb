//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin (admins cannot self-register through the API)
//! dvdrental-cli users create -u root -p 'long passphrase' -r admin
//!
//! # List all users
//! dvdrental-cli users list
//! ```
//!
//! # Environment Variables
//!
//! - `DVDRENTAL_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use secrecy::SecretString;
use thiserror::Error;

use dvdrental_api::db::{self, RepositoryError, UserRepository};
use dvdrental_api::services::auth::{AuthError, AuthService, Registration};
use dvdrental_core::{Role, RoleError, UserId, Username, UsernameError};

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid role.
    #[error(transparent)]
    InvalidRole(#[from] RoleError),

    /// Password was empty.
    #[error("Password cannot be blank")]
    BlankPassword,

    /// Account creation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Repository query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Arguments for `users create`.
#[derive(Debug)]
pub struct CreateUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Read the database URL, preferring the service-specific variable.
fn database_url() -> Result<SecretString, UserCommandError> {
    dotenvy::dotenv().ok();

    std::env::var("DVDRENTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| UserCommandError::MissingEnvVar("DVDRENTAL_DATABASE_URL"))
}

/// Validate `users create` arguments before touching the database.
fn parse_registration(args: CreateUser<'_>) -> Result<Registration, UserCommandError> {
    let username = Username::parse(args.username.trim())?;
    let role: Role = args.role.parse()?;

    if args.password.trim().is_empty() {
        return Err(UserCommandError::BlankPassword);
    }

    Ok(Registration {
        username,
        password: args.password.to_owned(),
        role,
        first_name: args.first_name,
        last_name: args.last_name,
    })
}

/// Create a user with any role.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(args: CreateUser<'_>) -> Result<UserId, UserCommandError> {
    let registration = parse_registration(args)?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url()?).await?;

    tracing::info!(
        "Creating user: {} ({})",
        registration.username,
        registration.role
    );

    let user = AuthService::new(&pool).create_user(registration).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );

    Ok(user.id)
}

/// List every user, ordered by id.
pub async fn list() -> Result<(), UserCommandError> {
    let pool = db::create_pool(&database_url()?).await?;
    let users = UserRepository::new(&pool).list().await?;

    if users.is_empty() {
        tracing::info!("No users");
        return Ok(());
    }

    for user in &users {
        tracing::info!("{:>6}  {:<6}  {}", user.id, user.role, user.username);
    }
    tracing::info!("{} user(s)", users.len());

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args<'a>(username: &'a str, password: &'a str, role: &'a str) -> CreateUser<'a> {
        CreateUser {
            username,
            password,
            role,
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_parse_registration_admin() {
        let registration = parse_registration(args("root", "pw1", "admin")).unwrap();
        assert_eq!(registration.username.as_str(), "root");
        assert_eq!(registration.role, Role::Admin);
    }

    #[test]
    fn test_parse_registration_rejects_bad_input() {
        assert!(matches!(
            parse_registration(args("", "pw1", "user")),
            Err(UserCommandError::InvalidUsername(_))
        ));
        assert!(matches!(
            parse_registration(args("root", "pw1", "owner")),
            Err(UserCommandError::InvalidRole(_))
        ));
        assert!(matches!(
            parse_registration(args("root", "  ", "user")),
            Err(UserCommandError::BlankPassword)
        ));
    }
}
