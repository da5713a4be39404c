//! GET /api/health - pooled liveness query.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.catalog.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                ok: true,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    ok: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
