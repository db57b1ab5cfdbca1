//! In-memory repositories for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use mealvote_db::{CreateUser, DbError, DbResult, UserRepository, UserRow};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user row directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    /// Push the stored refresh expiry into the past, simulating a
    /// refresh token that outlived its server-side window
    pub fn expire_stored_refresh_token(&self, id: Uuid) {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.refresh_token_expires_at = Some(Utc::now() - Duration::hours(1));
        }
    }

    /// Read the stored refresh hash (test assertions only)
    pub fn stored_refresh_hash(&self, id: Uuid) -> Option<String> {
        self.users
            .get(&id)
            .and_then(|u| u.refresh_token_hash.clone())
    }

    /// Remove a user entirely
    pub fn remove_user(&self, id: Uuid) {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_email.remove(&user.email);
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_social_id(&self, social_id: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.value().social_id.as_deref() == Some(social_id))
            .map(|r| r.value().clone()))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::Conflict);
        }
        let row = UserRow {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            social_id: user.social_id,
            nickname: user.nickname,
            refresh_token_hash: None,
            refresh_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_user(row.clone());
        Ok(row)
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.refresh_token_hash = Some(token_hash.to_string());
            user.refresh_token_expires_at = Some(expires_at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn clear_refresh_token(&self, id: Uuid) -> DbResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.refresh_token_hash = None;
            user.refresh_token_expires_at = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_user_repo_crud() {
        let repo = MockUserRepository::new();

        let user = repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                password_hash: Some("hash".to_string()),
                social_id: None,
                nickname: "tester".to_string(),
            })
            .await
            .unwrap();

        let found = repo.find_by_email("test@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        // Refresh columns move together
        repo.update_refresh_token(user.id, "h1", Utc::now() + Duration::days(7))
            .await
            .unwrap();
        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(found.has_active_refresh_token());

        repo.clear_refresh_token(user.id).await.unwrap();
        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(!found.has_active_refresh_token());
    }

    #[tokio::test]
    async fn finds_users_by_social_id() {
        let repo = MockUserRepository::new();

        let user = repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                email: "social@example.com".to_string(),
                password_hash: None,
                social_id: Some("kakao:98765".to_string()),
                nickname: "social".to_string(),
            })
            .await
            .unwrap();

        let found = repo.find_by_social_id("kakao:98765").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        let missing = repo.find_by_social_id("kakao:00000").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = MockUserRepository::new();
        let make = |id| CreateUser {
            id,
            email: "dup@example.com".to_string(),
            password_hash: None,
            social_id: None,
            nickname: String::new(),
        };

        repo.create(make(Uuid::new_v4())).await.unwrap();
        let result = repo.create(make(Uuid::new_v4())).await;
        assert!(matches!(result, Err(DbError::Conflict)));
    }
}
