//! Health check handler

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use super::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Server timestamp in milliseconds
    pub timestamp_ms: u64,
    pub database: &'static str,
    pub chat_connections: usize,
}

/// GET /health
///
/// - Healthy: 200, database "up" or "disabled"
/// - Database configured but unreachable: 503, database "down"
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let database = match state.db.as_ref() {
        Some(db) => match db.health_check().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
                "down"
            }
        },
        None => "disabled",
    };

    let healthy = database != "down";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "unavailable" },
            version: env!("GIT_HASH"),
            timestamp_ms,
            database,
            chat_connections: state.chat.registry().len(),
        }),
    )
}
