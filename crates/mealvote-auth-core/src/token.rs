//! JWT issuance and verification
//!
//! Two token kinds share one claims shape and are told apart by a
//! `token_type` discriminator plus distinct signing secrets. Everything
//! in this module is stateless; persistence of refresh-token hashes
//! lives in the service layer.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use mealvote_types::UserId;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Token kind discriminator embedded in the claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal ID
    pub sub: String,
    /// Token kind ("access" or "refresh")
    pub token_type: TokenType,
    /// Unique token ID; iat/exp have second resolution, so without it
    /// two tokens minted in the same second would be byte-identical
    /// and rotation would overwrite a hash with itself
    pub jti: Uuid,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration (unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Check if the token is expired by its own claim
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Parse the principal ID from the subject claim
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        UserId::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// A freshly signed token plus its expiry instant.
///
/// The plaintext is only ever returned once; callers persist the hash.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints signed access and refresh tokens
#[derive(Clone)]
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    /// Create an issuer from the auth config
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_secs: config.access_ttl.as_secs() as i64,
            refresh_ttl_secs: config.refresh_ttl.as_secs() as i64,
        }
    }

    /// Issue a short-lived access token. No side effects.
    pub fn issue_access_token(&self, user_id: UserId) -> Result<String, AuthError> {
        let issued = self.sign(user_id, TokenType::Access, &self.access_key, self.access_ttl_secs)?;
        Ok(issued.token)
    }

    /// Issue a long-lived refresh token.
    ///
    /// Stateless at this layer; `AuthService` persists the hash and the
    /// returned expiry before handing the pair to the caller.
    pub fn issue_refresh_token(&self, user_id: UserId) -> Result<IssuedToken, AuthError> {
        self.sign(user_id, TokenType::Refresh, &self.refresh_key, self.refresh_ttl_secs)
    }

    fn sign(
        &self,
        user_id: UserId,
        token_type: TokenType,
        key: &EncodingKey,
        ttl_secs: i64,
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let exp = now + ttl_secs;
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            jti: Uuid::new_v4(),
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))?;

        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Validates signed tokens against the per-kind secrets
#[derive(Clone)]
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
}

impl TokenVerifier {
    /// Create a verifier from the auth config
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        }
    }

    /// Verify an access token: signature, expiry, claim type.
    ///
    /// Purely stateless; access tokens are never looked up server-side.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.access_key, &validation).map_err(|e| {
            tracing::debug!("Access token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        if data.claims.token_type != TokenType::Access {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }

    /// Stateless half of refresh verification: signature, embedded
    /// expiry, claim type. Each step short-circuits to a distinct
    /// failure kind so malformed tokens never reach the store.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        // Expiry is checked manually below so the signature result is
        // not conflated with the expiry result
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.refresh_key, &validation).map_err(|e| {
            tracing::debug!("Refresh token decoding failed: {}", e);
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::TamperedToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        if data.claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        if data.claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}
