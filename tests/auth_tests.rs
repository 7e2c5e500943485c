mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_then_login_round_trip() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };
    let email = common::unique_email();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": email, "password": "hunter2hunter2", "name": "Test User" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let profile = common::response_json(response).await;
    assert_eq!(profile["email"], email);
    assert_eq!(profile["score"], 0);
    assert_eq!(profile["level"], 1);
    assert!(profile.get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile = common::response_json(response).await;
    assert_eq!(profile["email"], email);
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };
    let email = common::unique_email();
    let body = json!({ "email": email, "password": "hunter2hunter2" });

    let response = app
        .clone()
        .oneshot(common::json_request("POST", "/api/auth/register", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(common::json_request("POST", "/api/auth/register", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };
    let email = common::unique_email();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": email, "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown email gets the same outcome as a bad password
    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": common::unique_email(), "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_validation_rejects_bad_input() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "not-an-email", "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": common::unique_email(), "password": "short" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
