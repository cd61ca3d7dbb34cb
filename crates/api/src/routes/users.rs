//! Admin-only user management.

use axum::{Json, extract::State};
use serde::Serialize;

use dvdrental_core::{Role, UserId, Username};

use super::auth::MessageResponse;
use crate::db::UserRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::User;
use crate::state::AppState;

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// `GET /users` body.
#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserSummary>,
}

/// `GET /users`
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<UserList>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(UserList {
        users: users.into_iter().map(UserSummary::from).collect(),
    }))
}

/// `DELETE /users`
pub async fn delete_all(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<MessageResponse>> {
    let deleted = UserRepository::new(state.pool()).delete_all().await?;

    tracing::warn!(admin = %admin.sub, deleted, "all users deleted");

    Ok(Json(MessageResponse {
        message: format!("{deleted} row(s) deleted"),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_has_no_password_field() {
        let summary = UserSummary::from(User {
            id: UserId::new(3),
            username: Username::parse("root").unwrap(),
            role: Role::Admin,
            first_name: None,
            last_name: Some("Ops".into()),
        });
        let value = serde_json::to_value(UserList {
            users: vec![summary],
        })
        .unwrap();

        let user = &value["users"][0];
        assert_eq!(user["id"], 3);
        assert_eq!(user["role"], "admin");
        assert_eq!(user["lastName"], "Ops");
        assert!(user.get("password").is_none());
        assert_eq!(user.as_object().unwrap().len(), 5);
    }
}
