// Shared by several integration binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use folio_core::config::Config;
use folio_duckdb::DuckDbBackend;
use folio_server::app::build_app;
use folio_server::state::AppState;

/// Build a test Config with sensible defaults for integration tests.
pub fn test_config() -> Config {
    Config {
        port: 0,
        db_path: ":memory:".to_string(),
        admin_username: "testadmin".to_string(),
        admin_password: "testpassword123".to_string(),
        session_hours: 24,
        geoip_path: "/nonexistent/GeoLite2-City.mmdb".to_string(),
        duckdb_memory_limit: "512MB".to_string(),
        https: false,
        cors_origins: vec![],
    }
}

/// Create a fresh in-memory backend + state + app for each test.
pub fn setup() -> (Arc<AppState>, axum::Router) {
    let db = DuckDbBackend::open_in_memory().expect("in-memory DuckDB");
    let state = Arc::new(AppState::new(db, test_config()));
    let app = build_app(Arc::clone(&state));
    (state, app)
}

/// Helper: build a JSON request.
pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

/// Helper: a JSON request carrying the admin session cookie.
pub fn admin_request(method: &str, uri: &str, body: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("cookie", cookie)
        .body(Body::from(body.to_string()))
        .expect("build request")
}

/// Helper: extract JSON body from a response.
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON body")
}

/// Log in as the test admin and return the `admin_session=...` cookie pair.
pub async fn login(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            r#"{"username":"testadmin","password":"testpassword123"}"#,
        ))
        .await
        .expect("login request");
    assert_eq!(response.status(), 200, "test admin login must succeed");

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login sets a cookie")
        .to_str()
        .expect("cookie is ascii");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
