use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use folio_core::content::SkillInput;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/skills`: all skills, grouped by category, strongest first.
pub async fn list_skills(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let skills = state
        .db
        .list_skills()
        .await
        .map_err(AppError::internal("Failed to fetch skills"))?;
    Ok(Json(json!({ "success": true, "data": skills })))
}

/// `POST /api/skills`: create a skill. Admin only.
pub async fn create_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<SkillInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let id = state
        .db
        .create_skill(&input)
        .await
        .map_err(AppError::internal("Failed to create skill"))?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `PUT /api/skills/{id}`: replace all fields. Admin only.
pub async fn update_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<SkillInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let updated = state
        .db
        .update_skill(id, &input)
        .await
        .map_err(AppError::internal("Failed to update skill"))?;
    if !updated {
        return Err(AppError::NotFound("Skill not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Skill updated successfully" }),
    ))
}

/// `DELETE /api/skills/{id}`: admin only.
pub async fn delete_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let deleted = state
        .db
        .delete_skill(id)
        .await
        .map_err(AppError::internal("Failed to delete skill"))?;
    if !deleted {
        return Err(AppError::NotFound("Skill not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Skill deleted successfully" }),
    ))
}

fn validate(input: &SkillInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() || input.category.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and category are required".to_string(),
        ));
    }
    Ok(())
}
