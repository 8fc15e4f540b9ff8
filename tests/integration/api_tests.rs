//! API tests driving the router in-process against the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookstore::{api, repository::InMemoryBookStore, AppConfig, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<InMemoryBookStore>) {
    let store = Arc::new(InMemoryBookStore::new());
    let state = AppState::new(AppConfig::default(), store.clone());
    (api::create_router(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

/// Create a book and return its id from the Location header
async fn create(app: &Router, body: Value) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("No Location header");
    location
        .strip_prefix("/books/")
        .expect("Unexpected Location")
        .to_string()
}

fn dune() -> Value {
    json!({"title": "Dune", "author": "Herbert", "summary": "desert planet"})
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let (app, store) = test_app();
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    store.set_failing(true);
    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_empty() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_echoes_fields_without_id() {
    let (app, store) = test_app();
    let (status, body) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, dune());
    assert!(body.get("id").is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_dune_scenario() {
    let (app, _) = test_app();
    let id = create(&app, dune()).await;

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "title": "Dune", "author": "Herbert", "summary": "desert planet"})
    );

    let updated = json!({"title": "Dune", "author": "Frank Herbert", "summary": "desert planet"});
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["author"], "Frank Herbert");

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["author"], "Frank Herbert");

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_round_trip_and_cap() {
    let (app, _) = test_app();
    for i in 0..150 {
        create(
            &app,
            json!({"title": format!("Book {}", i), "author": "Someone", "summary": ""}),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 100);
    assert_eq!(books[0]["title"], "Book 0");
    assert!(books[0]["id"].is_string());
    assert_eq!(books[0]["summary"], "");
}

#[tokio::test]
async fn test_update_replaces_fully() {
    let (app, _) = test_app();
    let id = create(&app, dune()).await;

    let replacement = json!({"title": "Children of Dune", "author": "F. Herbert", "summary": ""});
    let (status, _) = send(&app, Method::PUT, &format!("/books/{}", id), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(
        body,
        json!({"id": id, "title": "Children of Dune", "author": "F. Herbert", "summary": ""})
    );
}

#[tokio::test]
async fn test_delete_twice() {
    let (app, _) = test_app();
    let id = create(&app, dune()).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_absent_id_not_found() {
    let (app, _) = test_app();
    let uri = "/books/65a1f0c2e4b0a1b2c3d4e5f6";

    let (status, _) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PUT, uri, Some(dune())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_client_error() {
    let (app, store) = test_app();
    // A failing store would turn any store call into a 500
    store.set_failing(true);

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(dune())),
        (Method::DELETE, None),
    ] {
        let (status, _) = send(&app, method, "/books/not-an-id", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_invalid_payload_rejected() {
    let (app, store) = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "Dune", "author": "Herbert"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "", "author": "Herbert", "summary": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_invalid_update_payload_leaves_book_unchanged() {
    let (app, _) = test_app();
    let id = create(&app, dune()).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"title": "", "author": "x", "summary": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"title": "Dune", "summary": "no author"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": id, "title": "Dune", "author": "Herbert", "summary": "desert planet"})
    );
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (app, store) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_fault_is_generic_server_error() {
    let (app, store) = test_app();
    let id = create(&app, dune()).await;
    store.set_failing(true);

    let requests = [
        (Method::GET, "/books".to_string(), None),
        (Method::GET, format!("/books/{}", id), None),
        (Method::POST, "/books".to_string(), Some(dune())),
        (Method::PUT, format!("/books/{}", id), Some(dune())),
        (Method::DELETE, format!("/books/{}", id), None),
    ];

    for (method, uri, body) in requests {
        let (status, body) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Database error");
    }
}
