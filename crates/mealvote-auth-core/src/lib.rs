//! Mealvote Auth Core - Authentication business logic
//!
//! Credential verification, access/refresh token issuance, refresh-token
//! rotation and revocation. The HTTP surface lives in `services/auth-api`;
//! this crate only depends on the repository traits from `mealvote-db`.

pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, TokenPair};
pub use token::{Claims, TokenIssuer, TokenType, TokenVerifier};
