use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{CreateTaskRequest, TaskView},
    services::{task_service::TaskService, user_service::UserService, AppState},
};

/// GET /api/tasks/{tg_id} - the user's tasks, newest first
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Path(tg_id): Path<i64>,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    let service = TaskService::new(state.mongo.clone());
    let tasks = service.list_for_tg(tg_id).await?;

    Ok(Json(tasks))
}

/// POST /api/tasks/{tg_id} - create a task, resolving the user first
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(tg_id): Path<i64>,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::bad_request(format!("Validation error: {}", e)));
    }

    let users = UserService::new(state.mongo.clone());
    let user = users.resolve_or_create_by_tg(tg_id).await?;
    let user_id = user
        .id
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let service = TaskService::new(state.mongo.clone());
    let task = service.create(user_id, &req.title).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// POST /api/tasks/{task_id}/complete - one-way completion, idempotent
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let task_id =
        ObjectId::parse_str(&task_id).map_err(|_| ApiError::bad_request("Invalid task id"))?;

    let service = TaskService::new(state.mongo.clone());
    let task = service.complete(task_id).await?;

    Ok(Json(task))
}
