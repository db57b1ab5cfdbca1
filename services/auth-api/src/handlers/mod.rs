//! HTTP handlers

mod auth;
mod health;

pub use auth::{me, refresh, sign_in, sign_out, sign_up};
pub use health::{health, ready};
