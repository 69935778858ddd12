//! End-to-end tests for the item endpoints and the shared-secret gate.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{get, send, test_app, TEST_API_KEY};

async fn create_item(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/items", Some(body), Some(TEST_API_KEY)).await
}

fn ada() -> Value {
    json!({"username": "ada", "email": "ada@example.com", "age": 36})
}

#[tokio::test]
async fn mutation_without_key_is_unauthenticated() {
    let (app, _dir) = test_app();

    let (status, _) = send(&app, Method::POST, "/api/items", Some(ada()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutation_with_wrong_key_is_forbidden() {
    let (app, _dir) = test_app();

    let (status, _) =
        send(&app, Method::POST, "/api/items", Some(ada()), Some("wrong")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn correct_key_proceeds_to_validation() {
    let (app, _dir) = test_app();

    // Gate passes, then the invalid body is rejected with 400
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/items",
        Some(json!({"username": "ada"})),
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = create_item(&app, ada()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["username"], "ada");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["age"], 36);
    assert!(created["createdAt"].is_string());
}

#[tokio::test]
async fn reads_are_open() {
    let (app, _dir) = test_app();

    let (_, created) = create_item(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    // No key on either read
    let (status, body) = get(&app, "/api/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["username"], "ada");

    let (status, fetched) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
}

#[tokio::test]
async fn put_requires_full_shape() {
    let (app, _dir) = test_app();

    let (_, created) = create_item(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    // Partial body on PUT is rejected
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/items/{id}"),
        Some(json!({"age": 37})),
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Full body replaces
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/items/{id}"),
        Some(json!({"username": "lovelace", "email": "al@example.com", "age": 37})),
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item replaced");

    let (_, fetched) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(fetched["username"], "lovelace");
    assert_eq!(fetched["age"], 37);
}

#[tokio::test]
async fn patch_updates_single_field() {
    let (app, _dir) = test_app();

    let (_, created) = create_item(&app, ada()).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/items/{id}"),
        Some(json!({"age": 37})),
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(fetched["age"], 37);
    assert_eq!(fetched["username"], "ada");
}

#[tokio::test]
async fn delete_requires_key_and_is_terminal() {
    let (app, _dir) = test_app();

    let (_, created) = create_item(&app, ada()).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/items/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, &uri, None, Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, None, Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gate_runs_before_id_and_body_checks() {
    let (app, _dir) = test_app();

    // Bad id with no key: the gate answers first
    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/items/not-a-uuid",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // With the key, the id gate takes over
    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/items/not-a-uuid",
        None,
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
