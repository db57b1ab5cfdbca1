//! Auth service - credential checks, token pairs, refresh rotation
//!
//! Composes the stateless token issuer/verifier with the user
//! repository. All refresh-token persistence goes through here so the
//! hash and its mirrored expiry are always written or cleared together.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mealvote_db::{CreateUser, UserRepository, UserRow};
use mealvote_types::UserId;

use crate::config::AuthConfig;
use crate::crypto::{hash_token, token_matches_hash};
use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::token::{Claims, TokenIssuer, TokenVerifier};

/// Access + refresh token pair returned from sign-in and refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the refresh token, mirrored into the stored column
    pub refresh_expires_at: DateTime<Utc>,
}

/// Authentication service
///
/// Constructed once at process start and shared across request
/// handlers; no global registries.
pub struct AuthService<U: UserRepository> {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    users: Arc<U>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new auth service
    pub fn new(config: &AuthConfig, users: Arc<U>) -> Self {
        Self {
            issuer: TokenIssuer::new(config),
            verifier: TokenVerifier::new(config),
            users,
        }
    }

    // =========================================================================
    // Credentials
    // =========================================================================

    /// Register a new principal with an email/password credential
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<UserRow, AuthError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(CreateUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash: Some(password_hash),
                social_id: None,
                nickname: nickname.to_string(),
            })
            .await
            .map_err(|e| match e {
                // Concurrent sign-up lost the uniqueness race
                mealvote_db::DbError::Conflict => AuthError::EmailTaken,
                other => AuthError::from(other),
            })?;

        Ok(user)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// "No such email" and "wrong password" both surface as
    /// `InvalidCredentials`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(UserRow, TokenPair), AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Social-only accounts have no password credential
        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, stored_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.issue_token_pair(user.user_id()).await?;
        Ok((user, pair))
    }

    // =========================================================================
    // Token lifecycle
    // =========================================================================

    /// Issue an access/refresh pair for a principal.
    ///
    /// The refresh hash and expiry are persisted (overwriting any prior
    /// value: rotation) before the pair is returned. On a persistence
    /// failure no pair is handed out.
    pub async fn issue_token_pair(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let access_token = self.issuer.issue_access_token(user_id)?;
        let refresh = self.issuer.issue_refresh_token(user_id)?;

        let token_hash = hash_token(&refresh.token);
        self.users
            .update_refresh_token(user_id.0, &token_hash, refresh.expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Verify an access token. Stateless; no store lookup.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verifier.verify_access_token(token)
    }

    /// Verify a presented refresh token against the stored hash.
    ///
    /// Stateless checks (signature, embedded expiry, claim type) run
    /// first; only then is the principal loaded. A stored expiry in the
    /// past revokes the stored token as a side effect.
    pub async fn verify_refresh_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.verifier.decode_refresh_token(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let (Some(stored_hash), Some(stored_expiry)) =
            (user.refresh_token_hash.as_deref(), user.refresh_token_expires_at)
        else {
            return Err(AuthError::NoActiveSession);
        };

        if !token_matches_hash(token, stored_hash) {
            // A rotated-out or foreign token; the stored one stays live
            return Err(AuthError::InvalidToken);
        }

        if stored_expiry < Utc::now() {
            self.users.clear_refresh_token(user_id.0).await?;
            return Err(AuthError::TokenExpired);
        }

        Ok(user_id)
    }

    /// Rotate: verify the presented refresh token, then mint and
    /// persist a new pair. The old refresh token becomes unusable the
    /// moment the new hash lands.
    pub async fn refresh(&self, token: &str) -> Result<TokenPair, AuthError> {
        let user_id = self.verify_refresh_token(token).await?;
        self.issue_token_pair(user_id).await
    }

    /// Clear the stored refresh token. Idempotent; revoking an
    /// already-revoked principal is a no-op success.
    pub async fn revoke(&self, user_id: UserId) -> Result<(), AuthError> {
        self.users.clear_refresh_token(user_id.0).await?;
        Ok(())
    }

    // =========================================================================
    // Principal lookup
    // =========================================================================

    /// Load a principal by ID for the request gate
    pub async fn get_user(&self, user_id: UserId) -> Result<UserRow, AuthError> {
        self.users
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

impl<U: UserRepository> std::fmt::Debug for AuthService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
