use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde_json::json;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/analytics/stats`: the dashboard rollup, recomputed from raw
/// event rows on every call. Admin only.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let snapshot = state
        .db
        .analytics_snapshot()
        .await
        .map_err(AppError::internal("Failed to fetch analytics"))?;

    Ok(Json(json!({ "success": true, "data": snapshot })))
}
