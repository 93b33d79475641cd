use std::sync::Arc;

use axum::{extract::State, http::header, http::HeaderMap, response::IntoResponse, Json};
use serde_json::json;

use folio_core::event::{PageViewRecord, TrackRequest};

use crate::{
    enrich::{extract_client_ip, header_str, visitor_profile},
    error::AppError,
    state::AppState,
};

/// `POST /api/analytics/track`: ingest one tracked event.
///
/// Two event types share the endpoint, discriminated by the payload's
/// `type` field. No auth, no idempotency: the client is fire-and-forget, so
/// a retried request simply lands twice.
///
/// Page views pick up `User-Agent` / `Referer` and the client address from
/// the request itself; the parsed UA and optional GeoIP result enrich the
/// visitor row.
#[tracing::instrument(skip(state, headers, payload))]
pub async fn track(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<TrackRequest>,
) -> Result<impl IntoResponse, AppError> {
    match payload {
        TrackRequest::PageView(data) => {
            if data.page_path.is_empty() || data.visitor_id.is_empty() || data.session_id.is_empty()
            {
                return Err(AppError::BadRequest(
                    "page_path, visitor_id and session_id are required".to_string(),
                ));
            }

            let user_agent = header_str(&headers, header::USER_AGENT);
            let referrer = header_str(&headers, header::REFERER);
            let ip_address = extract_client_ip(&headers);
            let profile = visitor_profile(&state.config.geoip_path, &ip_address, &user_agent);

            let record = PageViewRecord {
                page_path: data.page_path,
                visitor_id: data.visitor_id,
                session_id: data.session_id,
                user_agent,
                referrer,
                ip_address,
                profile,
            };

            state
                .db
                .record_page_view(&record)
                .await
                .map_err(AppError::internal("Failed to track analytics"))?;
        }
        TrackRequest::Engagement(data) => {
            if data.page_path.is_empty() || data.visitor_id.is_empty() || data.session_id.is_empty()
            {
                return Err(AppError::BadRequest(
                    "page_path, visitor_id and session_id are required".to_string(),
                ));
            }
            if !(0.0..=1.0).contains(&data.scroll_depth) {
                return Err(AppError::BadRequest(
                    "scroll_depth must be between 0 and 1".to_string(),
                ));
            }

            state
                .db
                .record_engagement(&data)
                .await
                .map_err(AppError::internal("Failed to track analytics"))?;
        }
    }

    Ok(Json(json!({ "success": true })))
}
