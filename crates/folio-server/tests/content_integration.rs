mod common;

use common::{admin_request, json_body, json_request, login, setup};
use tower::ServiceExt;

#[tokio::test]
async fn skill_crud_round_trip_over_http() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    // Create.
    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            "/api/skills",
            r#"{"name":"Rust","category":"Languages","proficiency":5,"icon":"rust"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    // List (public) returns the exact fields submitted.
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/skills", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    let skills = body["data"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["id"], id);
    assert_eq!(skills[0]["name"], "Rust");
    assert_eq!(skills[0]["category"], "Languages");
    assert_eq!(skills[0]["proficiency"], 5);
    assert_eq!(skills[0]["icon"], "rust");

    // Update replaces all fields.
    let response = app
        .clone()
        .oneshot(admin_request(
            "PUT",
            &format!("/api/skills/{id}"),
            r#"{"name":"Rust","category":"Systems","proficiency":4}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Skill updated successfully");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/skills", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["category"], "Systems");
    assert_eq!(body["data"][0]["icon"], serde_json::Value::Null);

    // Delete, then verify gone.
    let response = app
        .clone()
        .oneshot(admin_request(
            "DELETE",
            &format!("/api/skills/{id}"),
            "",
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .oneshot(json_request("GET", "/api/skills", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn skill_validation_and_not_found_paths() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            "/api/skills",
            r#"{"name":"","category":"Languages"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Name and category are required");

    let response = app
        .clone()
        .oneshot(admin_request(
            "PUT",
            "/api/skills/999",
            r#"{"name":"Rust","category":"Languages"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app
        .oneshot(admin_request("DELETE", "/api/skills/999", "", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Skill not found");
}

#[tokio::test]
async fn project_create_coerces_featured_to_integer() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            "/api/projects",
            r#"{"title":"Folio","description":"Portfolio backend","category":"Web","featured":true,
               "technologies":"Rust, Axum, DuckDB"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/projects", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["featured"], 1);
    assert_eq!(body["data"][0]["long_description"], "");

    let response = app
        .oneshot(json_request("GET", "/api/projects/count", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["featured"], 1);
    assert_eq!(body["data"]["categories"][0]["category"], "Web");
}

#[tokio::test]
async fn project_validation_requires_title_description_category() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    let response = app
        .oneshot(admin_request(
            "POST",
            "/api/projects",
            r#"{"title":"Folio","description":"","category":"Web"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Title, description, and category are required");
}

#[tokio::test]
async fn experience_round_trip_with_current_flag() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(admin_request(
            "POST",
            "/api/experience",
            r#"{"company":"Freelance","position":"Engineer","description":"Shipping things",
               "start_date":"2020-01","current":true,"technologies":"Rust"}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .oneshot(json_request("GET", "/api/experience", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["current"], 1);
    assert_eq!(body["data"][0]["end_date"], serde_json::Value::Null);
}

#[tokio::test]
async fn about_upsert_updates_in_place() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    for content in ["First", "Second"] {
        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                "/api/about",
                &format!(r#"{{"section":"main_description","title":"About Me","content":"{content}"}}"#),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let response = app
        .oneshot(json_request("GET", "/api/about", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    let sections = body["data"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["content"], "Second");
}

#[tokio::test]
async fn site_stats_round_trip_in_display_order() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    for (key, order) in [("years", 2), ("projects", 1)] {
        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                "/api/stats",
                &format!(
                    r#"{{"key":"{key}","value":"6+","label":"Figure","display_order":{order}}}"#
                ),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let response = app
        .oneshot(json_request("GET", "/api/stats", ""))
        .await
        .unwrap();
    let body = json_body(response).await;
    let stats = body["data"].as_array().unwrap();
    assert_eq!(stats[0]["key"], "projects");
    assert_eq!(stats[0]["color"], "blue");
    assert_eq!(stats[1]["key"], "years");
}

#[tokio::test]
async fn contact_flow_create_list_mark_read() {
    let (_state, app) = setup();
    let cookie = login(&app).await;

    // Visitors submit without auth.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contact",
            r#"{"name":"Ada","email":"ada@example.com","subject":"Hello","message":"Hi there"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = json_body(response).await;
    let id = body["id"].as_i64().unwrap();

    // Admin inbox shows it unread.
    let response = app
        .clone()
        .oneshot(admin_request("GET", "/api/contact", "", &cookie))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["id"], id);
    assert_eq!(body["data"][0]["read"], 0);

    // Mark read; the stored flag flips to 1.
    let response = app
        .clone()
        .oneshot(admin_request(
            "PUT",
            &format!("/api/contact/{id}"),
            r#"{"read":true}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .clone()
        .oneshot(admin_request("GET", "/api/contact", "", &cookie))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"][0]["read"], 1);

    // Delete, then a further update is a 404.
    let response = app
        .clone()
        .oneshot(admin_request(
            "DELETE",
            &format!("/api/contact/{id}"),
            "",
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .oneshot(admin_request(
            "PUT",
            &format!("/api/contact/{id}"),
            r#"{"read":false}"#,
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn contact_create_requires_all_four_fields() {
    let (_state, app) = setup();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contact",
            r#"{"name":"Ada","email":"ada@example.com","subject":"Hello","message":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body = json_body(response).await;
    assert_eq!(body["error"], "All fields are required");
}
