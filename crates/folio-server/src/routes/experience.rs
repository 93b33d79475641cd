use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use folio_core::content::ExperienceInput;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/experience`: most recent role first.
pub async fn list_experience(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let entries = state
        .db
        .list_experience()
        .await
        .map_err(AppError::internal("Failed to fetch experience"))?;
    Ok(Json(json!({ "success": true, "data": entries })))
}

/// `POST /api/experience`: create an entry. Admin only.
pub async fn create_experience(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<ExperienceInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let id = state
        .db
        .create_experience(&input)
        .await
        .map_err(AppError::internal("Failed to create experience"))?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `PUT /api/experience/{id}`: replace all fields. Admin only.
pub async fn update_experience(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<ExperienceInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let updated = state
        .db
        .update_experience(id, &input)
        .await
        .map_err(AppError::internal("Failed to update experience"))?;
    if !updated {
        return Err(AppError::NotFound("Experience not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Experience updated successfully" }),
    ))
}

/// `DELETE /api/experience/{id}`: admin only.
pub async fn delete_experience(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let deleted = state
        .db
        .delete_experience(id)
        .await
        .map_err(AppError::internal("Failed to delete experience"))?;
    if !deleted {
        return Err(AppError::NotFound("Experience not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Experience deleted successfully" }),
    ))
}

fn validate(input: &ExperienceInput) -> Result<(), AppError> {
    if input.company.trim().is_empty()
        || input.position.trim().is_empty()
        || input.description.trim().is_empty()
        || input.start_date.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Company, position, description, and start date are required".to_string(),
        ));
    }
    Ok(())
}
