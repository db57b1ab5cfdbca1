//! Authentication handlers (sign-up, sign-in, refresh, sign-out, me)

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use mealvote_db::UserRow;
use mealvote_types::{ApiResponse, MessageResponse};

use crate::cookies::{clear_refresh_cookie, refresh_cookie};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, RefreshToken};
use crate::state::AppState;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 4;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Defaults to the local part of the email when omitted
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub nickname: String,
}

impl From<&UserRow> for UserInfo {
    fn from(user: &UserRow) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/sign-up
///
/// Register a new account with an email/password credential
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = req.email.trim();
    validate_email(email)?;
    validate_password(&req.password)?;

    let nickname = match req.nickname.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        // "alice@example.com" registers as "alice"
        _ => email.split('@').next().unwrap_or(email).to_string(),
    };

    let user = state.auth.sign_up(email, &req.password, &nickname).await?;
    tracing::info!(user_id = %user.id, "New account registered");

    let body = ApiResponse::success_with_message("Registration successful", UserInfo::from(&user));
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/v1/auth/sign-in
///
/// Verify credentials; returns an access token and installs the
/// refresh cookie
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<impl IntoResponse> {
    let (user, pair) = state.auth.sign_in(req.email.trim(), &req.password).await?;
    tracing::info!(user_id = %user.id, "Signed in");

    let cookie = refresh_cookie(
        &pair.refresh_token,
        state.refresh_ttl(),
        state.config.cookie_secure,
    );

    let body = ApiResponse::success(SignInResponse {
        access_token: pair.access_token,
        user: UserInfo::from(&user),
    });

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/v1/auth/refresh
///
/// Rotate the refresh token from the cookie and mint a new access token
pub async fn refresh(
    State(state): State<AppState>,
    RefreshToken(token): RefreshToken,
) -> ApiResult<impl IntoResponse> {
    let pair = state.auth.refresh(&token).await?;

    let cookie = refresh_cookie(
        &pair.refresh_token,
        state.refresh_ttl(),
        state.config.cookie_secure,
    );

    let body = ApiResponse::success(RefreshResponse {
        access_token: pair.access_token,
    });

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/v1/auth/sign-out
///
/// Revoke the stored refresh token and expire the cookie. Requires a
/// valid access token.
pub async fn sign_out(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    state.auth.revoke(auth_user.user_id).await?;
    tracing::info!(user_id = %auth_user.user_id, "Signed out");

    let cookie = clear_refresh_cookie(state.config.cookie_secure);
    let body = MessageResponse::new("Signed out");

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

/// GET /api/v1/auth/me
///
/// Get current user info from the access token
pub async fn me(auth_user: AuthUser) -> ApiResult<Json<ApiResponse<UserInfo>>> {
    Ok(Json(ApiResponse::success(UserInfo {
        id: auth_user.user_id.to_string(),
        email: auth_user.email,
        nickname: auth_user.nickname,
    })))
}

// ============================================================================
// Validation
// ============================================================================

fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid email address".to_string()))
    }
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
