//! Configuration for the Auth API service.

use mealvote_auth_core::AuthConfig;
use std::time::Duration;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Request timeout
    pub request_timeout: Duration,

    /// Whether the refresh cookie carries the `Secure` attribute
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Signing secrets (minimum 32 bytes each)
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_ACCESS_SECRET"))?;
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_REFRESH_SECRET"))?;

        if access_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_ACCESS_SECRET must be at least 32 characters",
            ));
        }
        if refresh_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_REFRESH_SECRET must be at least 32 characters",
            ));
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ",
            ));
        }

        let mut auth = AuthConfig::new(access_secret, refresh_secret);

        // Token lifetime overrides
        if let Ok(secs) = std::env::var("ACCESS_TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_TTL_SECS"))?;
            auth = auth.with_access_ttl(Duration::from_secs(secs));
        }
        if let Ok(secs) = std::env::var("REFRESH_TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_TTL_SECS"))?;
            auth = auth.with_refresh_ttl(Duration::from_secs(secs));
        }

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Secure cookies are on by default; turned off for local HTTP
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            http_port,
            database_url,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            cookie_secure,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
