//! Health check handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::time::Instant;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: DbCheck,
}

#[derive(Debug, Serialize)]
pub struct DbCheck {
    pub status: &'static str,
    pub latency_ms: u64,
}

/// GET /health - Liveness probe, no dependencies
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "auth-api",
    })
}

/// GET /ready - Readiness probe; 503 until the database answers
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ReadyResponse>)> {
    let start = Instant::now();
    let db_ok = sqlx::query("SELECT 1").fetch_one(&*state.pool).await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    let response = ReadyResponse {
        status: if db_ok { "ready" } else { "not_ready" },
        database: DbCheck {
            status: if db_ok { "ok" } else { "error" },
            latency_ms,
        },
    };

    if db_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
