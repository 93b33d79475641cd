pub mod handlers;
pub mod session;

use axum::http::{header, HeaderMap};

use crate::error::AppError;
use crate::state::AppState;

/// The guard run at the top of every protected admin handler.
///
/// Missing, malformed, or expired sessions all read as "not logged in";
/// none of them is a server fault.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<session::Session, AppError> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .find_map(|c| c.trim().strip_prefix("admin_session="))
        })
        .and_then(session::decode_session)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}
