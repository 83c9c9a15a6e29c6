//! Route tests for both HTTP variants.
//!
//! The persisted variant runs against an in-memory SQLite database, so no
//! external infrastructure is required.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use std::time::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_lib::routes::{create_ephemeral_router, create_router};
use api_lib::state::AppState;
use common::AppConfig;

// =============================================================================
// Test Helpers
// =============================================================================

async fn persisted_app() -> Router {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        ..AppConfig::default()
    };
    let state = AppState::connect(config).await.expect("in-memory database");
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, "/api/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", value);
    value
}

// =============================================================================
// Probes
// =============================================================================

#[tokio::test]
async fn test_root_and_health_on_both_variants() {
    for app in [create_ephemeral_router(), persisted_app().await] {
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello, world!"}));

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }
}

#[tokio::test]
async fn test_ready_when_database_answers() {
    let app = persisted_app().await;
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready"}));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = persisted_app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "User API");
    assert!(body["paths"].get("/api/users").is_some());
}

// =============================================================================
// Ephemeral Variant
// =============================================================================

#[tokio::test]
async fn test_echo_create_without_age() {
    let app = create_ephemeral_router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "User Ada created!",
            "user": {"name": "Ada", "email": "ada@example.com", "age": null}
        })
    );
}

#[tokio::test]
async fn test_echo_keeps_values_verbatim() {
    let app = create_ephemeral_router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": 7, "email": "not-an-email", "age": "36"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "User 7 created!",
            "user": {"name": 7, "email": "not-an-email", "age": "36"}
        })
    );

    for age in [json!(36.0), json!(36.5)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({"name": "Ada", "email": "ada@example.com", "age": age.clone()})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["age"], age);
    }
}

#[tokio::test]
async fn test_echo_missing_name_is_bad_request() {
    let app = create_ephemeral_router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"email": "ada@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Name and email are required");
}

#[tokio::test]
async fn test_echo_non_object_body_is_bad_request() {
    let app = create_ephemeral_router();
    let (status, _) = send(&app, Method::POST, "/users", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_echo_stores_nothing() {
    let app = create_ephemeral_router();
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;

    let (status, _) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Persisted Variant
// =============================================================================

#[tokio::test]
async fn test_create_returns_server_fields() {
    let app = persisted_app().await;
    let body = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;

    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["age"], Value::Null);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_rejects_missing_email() {
    let app = persisted_app().await;
    let (status, body) = send(&app, Method::POST, "/api/users", Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_malformed_email() {
    let app = persisted_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Ada", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Enter a valid email address");
}

#[tokio::test]
async fn test_create_rejects_long_name() {
    let app = persisted_app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "x".repeat(101), "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_types_age() {
    let app = persisted_app().await;
    let body = create(&app, json!({"name": "Ada", "email": "ada@example.com", "age": "36"})).await;
    assert_eq!(body["age"], 36);

    for age in [json!("old"), json!(36.5)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"name": "Grace", "email": "grace@example.com", "age": age})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "age must be an integer");
    }
}

#[tokio::test]
async fn test_duplicate_email_conflicts_and_first_remains() {
    let app = persisted_app().await;
    let first = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Imposter", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Email already exists");

    let uri = format!("/api/users/{}", first["id"]);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let grace = create(&app, json!({"name": "Grace", "email": "grace@example.com", "age": 45})).await;

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&Value> = body.as_array().unwrap().iter().map(|u| &u["id"]).collect();
    assert_eq!(ids, vec![&grace["id"], &ada["id"]]);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let app = persisted_app().await;
    let (status, body) = send(&app, Method::GET, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_replaces_all_fields() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com", "age": 36})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Ada Lovelace", "email": "lovelace@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ada["id"]);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["email"], "lovelace@example.com");
    assert_eq!(body["age"], Value::Null);
    assert_eq!(body["created_at"], ada["created_at"]);
    assert!(timestamp(&body["updated_at"]) >= timestamp(&ada["updated_at"]));
}

#[tokio::test]
async fn test_put_requires_name_and_email() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_missing_is_not_found() {
    let app = persisted_app().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users/42",
        Some(json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_updates_only_sent_fields() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com", "age": 36})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"name": "Countess"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Countess");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["age"], 36);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"age": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], Value::Null);
}

#[tokio::test]
async fn test_empty_patch_only_moves_updated_at() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com", "age": 36})).await;
    let uri = format!("/api/users/{}", ada["id"]);
    tokio::time::sleep(Duration::from_millis(10)).await;

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["id", "name", "email", "age", "created_at"] {
        assert_eq!(body[field], ada[field], "{} changed", field);
    }
    assert!(timestamp(&body["updated_at"]) > timestamp(&ada["updated_at"]));

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_patch_rejects_null_name_or_email() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    for patch in [json!({"name": null}), json!({"email": null})] {
        let (status, body) = send(&app, Method::PATCH, &uri, Some(patch)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["name"], "Ada");
    assert_eq!(fetched["email"], "ada@example.com");
}

#[tokio::test]
async fn test_patch_validates_email() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({"email": "nope"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_to_taken_email_conflicts() {
    let app = persisted_app().await;
    create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let grace = create(&app, json!({"name": "Grace", "email": "grace@example.com"})).await;
    let uri = format!("/api/users/{}", grace["id"]);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({"email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = persisted_app().await;
    let ada = create(&app, json!({"name": "Ada", "email": "ada@example.com"})).await;
    let uri = format!("/api/users/{}", ada["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
