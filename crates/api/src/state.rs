//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::auth::AuthService;
use crate::services::tokens::{TokenKeys, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and signing keys.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    token_keys: TokenKeys,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Signing keys are derived from `config.jwt` once here.
    #[must_use]
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        let token_keys = TokenKeys::new(&config.jwt);

        Self {
            inner: Arc::new(AppStateInner { pool, token_keys }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the JWT signing keys.
    #[must_use]
    pub fn token_keys(&self) -> &TokenKeys {
        &self.inner.token_keys
    }

    /// Authentication service bound to this state's pool.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.pool())
    }

    /// Token service bound to this state's keys and pool.
    #[must_use]
    pub fn tokens(&self) -> TokenService<'_> {
        TokenService::new(self.token_keys(), self.pool())
    }
}
