//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
///
/// `refresh_token_hash` and `refresh_token_expires_at` are both null or
/// both set; the repository API only writes or clears them together.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    /// Null for social-only accounts
    pub password_hash: Option<String>,
    pub social_id: Option<String>,
    pub nickname: String,
    /// SHA-256 hash of the most recently issued refresh token
    pub refresh_token_hash: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> mealvote_types::UserId {
        mealvote_types::UserId(self.id)
    }

    /// Whether the row currently backs a live refresh token
    pub fn has_active_refresh_token(&self) -> bool {
        self.refresh_token_hash.is_some() && self.refresh_token_expires_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: Some("hash".to_string()),
            social_id: None,
            nickname: "user".to_string(),
            refresh_token_hash: None,
            refresh_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn no_refresh_token_by_default() {
        assert!(!bare_user().has_active_refresh_token());
    }

    #[test]
    fn refresh_token_requires_both_columns() {
        let mut user = bare_user();
        user.refresh_token_hash = Some("abc".to_string());
        user.refresh_token_expires_at = Some(Utc::now());
        assert!(user.has_active_refresh_token());
    }
}
