//! Configuration types for the auth service

use std::time::Duration;

/// Default access token lifetime (30 minutes)
pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(30 * 60);

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Auth service configuration
///
/// Access and refresh tokens are signed with distinct secrets so a
/// token of one kind can never verify as the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access token signing
    pub access_secret: String,
    /// HMAC secret for refresh token signing
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime (mirrored into the stored expiry column)
    pub refresh_ttl: Duration,
}

impl AuthConfig {
    /// Create a new auth config with default TTLs
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }

    /// Local-development config. Never use these secrets in production.
    pub fn for_development() -> Self {
        Self::new(
            "mealvote-dev-access-secret-do-not-use-in-prod",
            "mealvote-dev-refresh-secret-do-not-use-in-prod",
        )
    }

    /// Set access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set refresh token lifetime
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ttls() {
        let config = AuthConfig::new("a", "b");
        assert_eq!(config.access_ttl, Duration::from_secs(1800));
        assert_eq!(config.refresh_ttl, Duration::from_secs(604_800));
    }

    #[test]
    fn builders_override_ttls() {
        let config = AuthConfig::new("a", "b")
            .with_access_ttl(Duration::from_secs(60))
            .with_refresh_ttl(Duration::from_secs(120));
        assert_eq!(config.access_ttl, Duration::from_secs(60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(120));
    }

    #[test]
    fn development_secrets_differ_per_token_kind() {
        let config = AuthConfig::for_development();
        assert_ne!(config.access_secret, config.refresh_secret);
    }
}
