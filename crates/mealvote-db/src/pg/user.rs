//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::UserRow;
use crate::repo::{CreateUser, UserRepository};

const USER_COLUMNS: &str = "id, email, password_hash, social_id, nickname, \
     refresh_token_hash, refresh_token_expires_at, created_at, updated_at";

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_social_id(&self, social_id: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE social_id = $1"
        ))
        .bind(social_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, email, password_hash, social_id, nickname)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.social_id)
        .bind(&user.nickname)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                DbError::Conflict
            } else {
                DbError::from(e)
            }
        })?;

        Ok(row)
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        // Single-row update; the last concurrent writer wins
        sqlx::query(
            "UPDATE users
             SET refresh_token_hash = $1, refresh_token_expires_at = $2, updated_at = now()
             WHERE id = $3",
        )
        .bind(token_hash)
        .bind(expires_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_refresh_token(&self, id: Uuid) -> DbResult<()> {
        sqlx::query(
            "UPDATE users
             SET refresh_token_hash = NULL, refresh_token_expires_at = NULL, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
