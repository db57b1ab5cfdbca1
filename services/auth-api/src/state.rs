//! Application state

use std::ops::Deref;
use std::sync::Arc;

use mealvote_auth_core::AuthService;
use mealvote_db::pg::PgUserRepository;
use mealvote_db::{DbPool, Repositories};

use crate::config::Config;

/// Type alias for the auth service with concrete repository types
pub type AuthServiceImpl = AuthService<PgUserRepository>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for credential checks and token lifecycle
    pub auth: Arc<AuthServiceImpl>,
    /// Database repositories
    pub repos: Repositories,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthServiceImpl, repos: Repositories, pool: DbPool, config: Config) -> Self {
        Self {
            auth: Arc::new(auth),
            repos,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }

    /// Refresh token lifetime, used for the cookie Max-Age
    pub fn refresh_ttl(&self) -> std::time::Duration {
        self.config.auth.refresh_ttl
    }
}
