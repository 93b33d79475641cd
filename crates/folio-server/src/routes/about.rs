use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde_json::json;

use folio_core::content::AboutSectionInput;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/about`: all sections in creation order.
pub async fn list_about(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let sections = state
        .db
        .list_about_sections()
        .await
        .map_err(AppError::internal("Failed to fetch about content"))?;
    Ok(Json(json!({ "success": true, "data": sections })))
}

/// `POST /api/about`: upsert by unique section name: update if present,
/// insert if absent. Admin only.
pub async fn upsert_about(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<AboutSectionInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    if input.section.trim().is_empty() || input.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Section and content are required".to_string(),
        ));
    }

    state
        .db
        .upsert_about_section(&input)
        .await
        .map_err(AppError::internal("Failed to update about content"))?;
    Ok(Json(json!({ "success": true })))
}
