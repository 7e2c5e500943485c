use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bson_datetime_as_chrono;

/// To-do item in the "tasks" collection. Completion is one-way: no edit,
/// no un-complete, no delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoTask {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "bson_datetime_as_chrono")]
    pub created_at: DateTime<Utc>,
}

impl TodoTask {
    pub fn new(user_id: ObjectId, title: &str) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            title: title.to_string(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Request to create a task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(
        min = 1,
        max = 256,
        message = "Title must be between 1 and 256 characters"
    ))]
    pub title: String,
}

/// Task returned to the client.
#[derive(Debug, Serialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TodoTask> for TaskView {
    fn from(task: TodoTask) -> Self {
        TaskView {
            id: task.id.to_hex(),
            title: task.title,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}
