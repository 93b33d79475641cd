use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{auth, routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware, outer-to-inner:
///
/// 1. `TraceLayer`: structured request/response logging via `tracing`.
/// 2. `CorsLayer`: permissive CORS for the ingest endpoint (the tracker
///    posts from the browser; public content reads are harmless to share).
///
/// Admin protection is per-handler (`auth::require_admin` at the top of each
/// guarded handler) because most collection paths mix a public method with
/// an admin one.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/analytics/track", post(routes::track::track))
        .route("/api/analytics/stats", get(routes::analytics::stats))
        .route(
            "/api/skills",
            get(routes::skills::list_skills).post(routes::skills::create_skill),
        )
        .route(
            "/api/skills/{id}",
            axum::routing::put(routes::skills::update_skill).delete(routes::skills::delete_skill),
        )
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/api/projects/count", get(routes::projects::project_count))
        .route(
            "/api/projects/{id}",
            axum::routing::put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/api/experience",
            get(routes::experience::list_experience).post(routes::experience::create_experience),
        )
        .route(
            "/api/experience/{id}",
            axum::routing::put(routes::experience::update_experience)
                .delete(routes::experience::delete_experience),
        )
        .route(
            "/api/about",
            get(routes::about::list_about).post(routes::about::upsert_about),
        )
        .route(
            "/api/stats",
            get(routes::site_stats::list_stats).post(routes::site_stats::create_stat),
        )
        .route(
            "/api/stats/{id}",
            axum::routing::put(routes::site_stats::update_stat)
                .delete(routes::site_stats::delete_stat),
        )
        .route(
            "/api/contact",
            get(routes::contact::list_messages).post(routes::contact::create_message),
        )
        .route(
            "/api/contact/{id}",
            axum::routing::put(routes::contact::update_message)
                .delete(routes::contact::delete_message),
        )
        .route("/api/admin/login", post(auth::handlers::login))
        .route("/api/admin/logout", post(auth::handlers::logout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
