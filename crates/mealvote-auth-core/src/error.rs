//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email not found or password mismatch at sign-in. Both collapse
    /// into one variant to avoid account enumeration.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Email already registered
    #[error("email already registered")]
    EmailTaken,

    /// Invalid token (malformed, wrong claim type, etc.)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired (embedded claim or stored expiry)
    #[error("token expired")]
    TokenExpired,

    /// Signature verification failed on a refresh token
    #[error("tampered token")]
    TamperedToken,

    /// Refresh attempted with no stored refresh token (signed out)
    #[error("no active session")]
    NoActiveSession,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::TamperedToken
            | Self::NoActiveSession
            // Deliberate: a missing principal surfaces as 401, not 404,
            // so token probing cannot reveal account existence
            | Self::UserNotFound => 401,
            Self::EmailTaken => 409,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TamperedToken => "TAMPERED_TOKEN",
            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<mealvote_db::DbError> for AuthError {
    fn from(err: mealvote_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::InvalidToken,
            AuthError::TokenExpired,
            AuthError::TamperedToken,
            AuthError::NoActiveSession,
            AuthError::UserNotFound,
        ] {
            assert_eq!(err.status_code(), 401, "{err}");
        }
    }

    #[test]
    fn store_errors_are_opaque_500s() {
        assert_eq!(AuthError::Database("boom".to_string()).status_code(), 500);
        assert_eq!(AuthError::Internal("boom".to_string()).status_code(), 500);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        assert_eq!(AuthError::EmailTaken.status_code(), 409);
    }
}
