//! GET /api/schema - the startup inspection snapshot.

use axum::{extract::State, Json};

use crate::api::state::AppState;
use crate::inspector::InspectionSummary;

pub async fn schema(State(state): State<AppState>) -> Json<InspectionSummary> {
    Json(state.summary.as_ref().clone())
}
