use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use folio_core::content::ProjectInput;

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `GET /api/projects`: featured first, newest first within each group.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let projects = state
        .db
        .list_projects()
        .await
        .map_err(AppError::internal("Failed to fetch projects"))?;
    Ok(Json(json!({ "success": true, "data": projects })))
}

/// `GET /api/projects/count`: public counter for the hero section.
pub async fn project_count(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let counts = state
        .db
        .project_counts()
        .await
        .map_err(AppError::internal("Failed to get project count"))?;
    Ok(Json(json!({ "success": true, "data": counts })))
}

/// `POST /api/projects`: create a project. Admin only.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<ProjectInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let id = state
        .db
        .create_project(&input)
        .await
        .map_err(AppError::internal("Failed to create project"))?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `PUT /api/projects/{id}`: replace all fields. Admin only.
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<ProjectInput>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;
    validate(&input)?;

    let updated = state
        .db
        .update_project(id, &input)
        .await
        .map_err(AppError::internal("Failed to update project"))?;
    if !updated {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Project updated successfully" }),
    ))
}

/// `DELETE /api/projects/{id}`: admin only.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let deleted = state
        .db
        .delete_project(id)
        .await
        .map_err(AppError::internal("Failed to delete project"))?;
    if !deleted {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Project deleted successfully" }),
    ))
}

fn validate(input: &ProjectInput) -> Result<(), AppError> {
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.category.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Title, description, and category are required".to_string(),
        ));
    }
    Ok(())
}
