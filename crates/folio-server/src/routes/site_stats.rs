use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use folio_core::content::SiteStatInput;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/stats`: headline figures in display order.
pub async fn list_stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let stats = state
        .db
        .list_site_stats()
        .await
        .map_err(AppError::internal("Failed to fetch stats"))?;
    Ok(Json(json!({ "success": true, "data": stats })))
}

/// `POST /api/stats`: create a figure. Admin only.
pub async fn create_stat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<SiteStatInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let id = state
        .db
        .create_site_stat(&input)
        .await
        .map_err(AppError::internal("Failed to create stat"))?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `PUT /api/stats/{id}`: replace all fields. Admin only.
pub async fn update_stat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<SiteStatInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let updated = state
        .db
        .update_site_stat(id, &input)
        .await
        .map_err(AppError::internal("Failed to update stat"))?;
    if !updated {
        return Err(AppError::NotFound("Stat not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Stat updated successfully" }),
    ))
}

/// `DELETE /api/stats/{id}`: admin only.
pub async fn delete_stat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let deleted = state
        .db
        .delete_site_stat(id)
        .await
        .map_err(AppError::internal("Failed to delete stat"))?;
    if !deleted {
        return Err(AppError::NotFound("Stat not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Stat deleted successfully" }),
    ))
}

fn validate(input: &SiteStatInput) -> Result<(), AppError> {
    if input.key.trim().is_empty() || input.value.trim().is_empty() || input.label.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Key, value, and label are required".to_string(),
        ));
    }
    Ok(())
}
