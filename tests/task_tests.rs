mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn tasks_list_newest_first_and_complete_is_idempotent() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };
    let tg_id = common::unique_tg_id();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            &format!("/api/tasks/{}", tg_id),
            json!({ "title": "buy milk" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = common::response_json(response).await;
    assert_eq!(first["completed"], false);

    // Keep creation timestamps apart so the ordering assertion is meaningful
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            &format!("/api/tasks/{}", tg_id),
            json!({ "title": "walk the dog" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(common::get_request(&format!("/api/tasks/{}", tg_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = common::response_json(response).await;
    let tasks = tasks.as_array().unwrap().clone();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "walk the dog");
    assert_eq!(tasks[1]["title"], "buy milk");

    // Complete twice: same task back, completed both times
    let task_id = first["id"].as_str().unwrap();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::json_request(
                "POST",
                &format!("/api/tasks/{}/complete", task_id),
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let task = common::response_json(response).await;
        assert_eq!(task["id"], task_id);
        assert_eq!(task["completed"], true);
    }
}

#[tokio::test]
async fn listing_tasks_for_unknown_user_is_empty_not_an_error() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };

    let response = app
        .oneshot(common::get_request(&format!(
            "/api/tasks/{}",
            common::unique_tg_id()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = common::response_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn completing_unknown_task_is_not_found() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/tasks/ffffffffffffffffffffffff/complete",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/tasks/garbage/complete",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrent_first_resolution_creates_a_single_user() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };
    let tg_id = common::unique_tg_id();

    // Both requests race the first-time user insert; the unique index plus
    // the duplicate-key retry must land both tasks on the same user row.
    let first = app.clone().oneshot(common::json_request(
        "POST",
        &format!("/api/tasks/{}", tg_id),
        json!({ "title": "task one" }),
    ));
    let second = app.clone().oneshot(common::json_request(
        "POST",
        &format!("/api/tasks/{}", tg_id),
        json!({ "title": "task two" }),
    ));
    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().status(), StatusCode::CREATED);
    assert_eq!(second.unwrap().status(), StatusCode::CREATED);

    let response = app
        .oneshot(common::get_request(&format!("/api/tasks/{}", tg_id)))
        .await
        .unwrap();
    let tasks = common::response_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_task_title_is_rejected() {
    let Some(app) = common::try_create_test_app().await else {
        return;
    };

    let response = app
        .oneshot(common::json_request(
            "POST",
            &format!("/api/tasks/{}", common::unique_tg_id()),
            json!({ "title": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
