//! Shared test fixtures

pub mod mock_repos;

pub use mock_repos::MockUserRepository;

use std::sync::Arc;

use mealvote_auth_core::{AuthConfig, AuthService};

/// Secrets used across the lifecycle tests
pub const TEST_ACCESS_SECRET: &str = "integration-access-secret-0123456789abcdef";
pub const TEST_REFRESH_SECRET: &str = "integration-refresh-secret-0123456789abcdef";

/// Build an auth service over a fresh in-memory repository
pub fn test_service() -> (AuthService<MockUserRepository>, Arc<MockUserRepository>) {
    let config = AuthConfig::new(TEST_ACCESS_SECRET, TEST_REFRESH_SECRET);
    let repo = Arc::new(MockUserRepository::new());
    let service = AuthService::new(&config, Arc::clone(&repo));
    (service, repo)
}
