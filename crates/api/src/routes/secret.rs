//! Fixed payload behind an access token.

use axum::Json;
use serde::Serialize;

use crate::middleware::RequireAccess;

#[derive(Debug, Serialize)]
pub struct SecretEntry {
    pub id: i32,
    pub uid: i32,
}

/// `GET /secret`
pub async fn secret(RequireAccess(_claims): RequireAccess) -> Json<[SecretEntry; 1]> {
    Json([SecretEntry { id: 12, uid: 32 }])
}
