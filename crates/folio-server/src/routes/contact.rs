use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use folio_core::content::{ContactMessageInput, ReadFlagUpdate};

use crate::{auth::require_admin, error::AppError, state::AppState};

/// `POST /api/contact`: public: visitors submit messages from the contact
/// form.
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ContactMessageInput>,
) -> Result<impl IntoResponse, AppError> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.subject.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    let id = state
        .db
        .create_contact_message(&input)
        .await
        .map_err(AppError::internal("Failed to save message"))?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `GET /api/contact`: inbox, newest first. Admin only.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let messages = state
        .db
        .list_contact_messages()
        .await
        .map_err(AppError::internal("Failed to fetch messages"))?;
    Ok(Json(json!({ "success": true, "data": messages })))
}

/// `PUT /api/contact/{id}`: toggle the read flag, the message's only
/// mutable field. Admin only.
pub async fn update_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(update): Json<ReadFlagUpdate>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let updated = state
        .db
        .set_contact_message_read(id, update.read)
        .await
        .map_err(AppError::internal("Failed to update message"))?;
    if !updated {
        return Err(AppError::NotFound("Message not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Message updated successfully" }),
    ))
}

/// `DELETE /api/contact/{id}`: admin only.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&state, &headers)?;

    let deleted = state
        .db
        .delete_contact_message(id)
        .await
        .map_err(AppError::internal("Failed to delete message"))?;
    if !deleted {
        return Err(AppError::NotFound("Message not found".to_string()));
    }
    Ok(Json(
        json!({ "success": true, "message": "Message deleted successfully" }),
    ))
}
