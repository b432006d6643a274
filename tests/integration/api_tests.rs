//! HTTP API tests driven through the router with `oneshot`

use crate::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use headline_harvester::api::{routes, AppState};
use headline_harvester::storage::{SqliteStorage, Storage};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_router(storage: Option<Arc<Mutex<SqliteStorage>>>) -> Router {
    routes(Arc::new(AppState::new(create_harvester(), storage)))
}

async fn post_batch(router: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/start-crawler")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// A mock site that fails the test if it receives any request
async fn start_untouchable_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_health() {
    let response = create_router(None)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_negative_depth_rejected_before_network() {
    let server = start_untouchable_server().await;
    let body = json!({
        "requests": [
            { "url": server.uri(), "keywords": [], "depth": 0 },
            { "url": server.uri(), "keywords": [], "depth": -1 }
        ]
    });

    let (status, body) = post_batch(create_router(None), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("negative"));
}

#[tokio::test]
async fn test_empty_url_rejected_before_network() {
    let server = start_untouchable_server().await;
    let body = json!({
        "requests": [
            { "url": server.uri(), "depth": 0 },
            { "url": "", "depth": 0 }
        ]
    });

    let (status, body) = post_batch(create_router(None), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, body) = post_batch(create_router(None), "{\"requests\": [").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON"));
}

#[tokio::test]
async fn test_successful_batch_response_shape() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;
    mount_html(&server, "/a1", SPORTS_ARTICLE).await;
    mount_html(&server, "/a2", WEATHER_ARTICLE).await;

    let seed = server.uri();
    let body = json!({
        "requests": [{ "url": seed, "keywords": ["sports"], "depth": 1 }]
    });

    let (status, body) = post_batch(create_router(None), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(
        object[&seed],
        json!({
            "title": "News",
            "headlines": [{
                "headline": "Sports News",
                "text": "Team wins championship",
                "text_link": "/a1",
                "category": "sports"
            }]
        })
    );
}

#[tokio::test]
async fn test_failed_seeds_yield_empty_object() {
    let server = MockServer::start().await;
    mount_robots(&server, 200, "User-agent: *\nDisallow: /").await;

    let body = json!({ "requests": [{ "url": server.uri(), "depth": 0 }] });
    let (status, body) = post_batch(create_router(None), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_batch_is_persisted() {
    let server = MockServer::start().await;
    mount_allow_all_robots(&server).await;
    mount_html(&server, "/", FRONT_PAGE).await;

    let storage = Arc::new(Mutex::new(SqliteStorage::new_in_memory().unwrap()));
    let seed = server.uri();
    let body = json!({ "requests": [{ "url": seed, "depth": 0 }] });

    let (status, _) = post_batch(create_router(Some(Arc::clone(&storage))), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let storage = storage.lock().unwrap();
    assert_eq!(storage.count_documents().unwrap(), 1);
    let document = storage.latest_document(&seed).unwrap().unwrap();
    assert_eq!(document.title, "News");
    assert_eq!(document.headlines.len(), 2);
}
