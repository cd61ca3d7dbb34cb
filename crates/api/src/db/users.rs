//! User repository for database operations.

use sqlx::PgPool;

use dvdrental_core::{Role, UserId, Username};

use super::RepositoryError;
use crate::models::{NewUser, User};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    role: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        // Rows written before roles existed carry NULL.
        let role = match row.role.as_deref() {
            None | Some("") => Role::User,
            Some(raw) => raw.parse::<Role>().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            })?,
        };

        Ok(Self {
            id: UserId::new(row.id),
            username,
            role,
            first_name: row.firstname,
            last_name: row.lastname,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserWithPasswordRow {
    #[sqlx(flatten)]
    user: UserRow,
    password: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, role, firstname, lastname
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithPasswordRow>(
            r"
            SELECT id, username, role, firstname, lastname, password
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user = User::try_from(row.user)?;
        Ok(Some((user, row.password)))
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password, role, firstname, lastname)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, role, firstname, lastname
            ",
        )
        .bind(new_user.username.as_str())
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.first_name.as_deref())
        .bind(new_user.last_name.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "username"))?;

        User::try_from(row)
    }

    /// List all users ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, role, firstname, lastname
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Delete every user.
    ///
    /// # Returns
    ///
    /// The number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: Option<&str>) -> UserRow {
        UserRow {
            id: 1,
            username: "alice".to_owned(),
            role: role.map(str::to_owned),
            firstname: Some("Alice".to_owned()),
            lastname: None,
        }
    }

    #[test]
    fn test_null_role_defaults_to_user() {
        let user = User::try_from(row(None)).ok();
        assert_eq!(user.map(|u| u.role), Some(Role::User));
    }

    #[test]
    fn test_admin_role_parsed() {
        let user = User::try_from(row(Some("admin"))).ok();
        assert_eq!(user.map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn test_unknown_role_is_corruption() {
        let result = User::try_from(row(Some("root")));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_blank_username_is_corruption() {
        let mut bad = row(None);
        bad.username = String::new();
        assert!(matches!(
            User::try_from(bad),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
