//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use mealvote_types::{ApiResponse, UserId};

use crate::state::AppState;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Authenticated user extracted from a bearer access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub nickname: String,
}

/// Auth rejection type
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    message: String,
}

impl AuthRejection {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

/// 401 carrying the specific verification failure ("token expired",
/// "tampered token", ...) rather than one generic message. Store
/// errors stay 500 with an opaque message.
fn gate_rejection(e: &mealvote_auth_core::AuthError) -> AuthRejection {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = ?e, "Access gate internal error");
        AuthRejection {
            status,
            message: "Internal server error".to_string(),
        }
    } else {
        tracing::debug!(error = ?e, "Access gate rejected request");
        AuthRejection {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse::failure(self.message);
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = extract_bearer_token(parts)?;

        // Stateless signature/expiry/type checks
        let claims = app_state
            .auth
            .verify_access_token(&token)
            .map_err(|e| gate_rejection(&e))?;

        let user_id = claims.user_id().map_err(|e| gate_rejection(&e))?;

        // Load the principal so handlers get a live identity
        let user = app_state
            .auth
            .get_user(user_id)
            .await
            .map_err(|e| gate_rejection(&e))?;

        Ok(AuthUser {
            user_id,
            email: user.email,
            nickname: user.nickname,
        })
    }
}

/// Refresh token read from the `refresh_token` cookie
#[derive(Debug, Clone)]
pub struct RefreshToken(pub String);

impl<S> FromRequestParts<S> for RefreshToken
where
    S: Send + Sync,
{
    type Rejection = crate::error::ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_refresh_cookie(parts)
            .map(RefreshToken)
            .ok_or(crate::error::ApiError::MissingRefreshToken)
    }
}

/// Extract a bearer token from the Authorization header
fn extract_bearer_token(parts: &Parts) -> Result<String, AuthRejection> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthRejection::unauthorized("No authentication token provided"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthRejection::unauthorized("Invalid Authorization header encoding"))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AuthRejection::unauthorized("No authentication token provided"))
}

/// Find the refresh cookie in the Cookie header, if present
fn extract_refresh_cookie(parts: &Parts) -> Option<String> {
    let cookie_str = parts.headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(REFRESH_COOKIE) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value.to_string());
            }
        }
    }

    None
}
