//! Mealvote Types - Shared domain types
//!
//! Domain types used across Mealvote services:
//! - Principal identity
//! - API response envelope

pub mod api;
pub mod user;

pub use api::*;
pub use user::*;
