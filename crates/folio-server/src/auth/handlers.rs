use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, state::AppState};

use super::session::{encode_session, issue_session};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/admin/login`: exchange admin credentials for a session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    if username != state.config.admin_username || password != state.config.admin_password {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let session = issue_session(&state.config);
    let value = encode_session(&session).map_err(AppError::internal("Internal server error"))?;
    let cookie = build_session_cookie(
        &value,
        state.config.https,
        state.config.session_max_age_seconds(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "message": "Login successful" })),
    ))
}

/// `POST /api/admin/logout`: clear the session cookie unconditionally.
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config.https);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "message": "Logout successful" })),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

// Path=/ rather than the admin prefix: the guard covers /api routes, so the
// cookie has to travel there.
fn build_session_cookie(value: &str, https: bool, max_age_seconds: u64) -> String {
    let secure = if https { "; Secure" } else { "" };
    format!(
        "admin_session={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_seconds}{secure}",
    )
}

fn clear_session_cookie(https: bool) -> String {
    let secure = if https { "; Secure" } else { "" };
    format!("admin_session=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0{secure}")
}
