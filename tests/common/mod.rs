#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use std::sync::Arc;
use uuid::Uuid;

use quizhub_api::{config::Config, create_router, services::AppState};

/// Builds the app against a real MongoDB, or None when TEST_MONGO_URI is not
/// set (the end-to-end suite is skipped on machines without a test cluster;
/// the solve path needs a replica set for transactions).
pub async fn try_create_test_app() -> Option<Router> {
    dotenvy::from_filename(".env.test").ok();

    let Ok(mongo_uri) = std::env::var("TEST_MONGO_URI") else {
        eprintln!("TEST_MONGO_URI not set; skipping integration test");
        return None;
    };

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let config = Config {
        mongo_uri: mongo_uri.clone(),
        mongo_database: std::env::var("TEST_MONGO_DATABASE")
            .unwrap_or_else(|_| "quizhub_test".to_string()),
        bind_addr: "127.0.0.1:0".to_string(),
    };

    let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
        .await
        .expect("Failed to connect to test MongoDB");

    // Indexes and problem seed run inside
    let app_state = Arc::new(
        AppState::new(config, mongo_client)
            .await
            .expect("Failed to initialize test app state"),
    );

    Some(create_router(app_state))
}

/// A messaging id no other test run will pick
pub fn unique_tg_id() -> i64 {
    (Uuid::new_v4().as_u128() & 0x3fff_ffff_ffff_ffff) as i64
}

pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
