use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOptions, ReturnDocument};
use mongodb::Database;

use super::error::ServiceError;
use crate::metrics::TASKS_CREATED_TOTAL;
use crate::models::{TaskView, TodoTask, User};

/// Per-user to-do items: create, list newest-first, mark complete.
pub struct TaskService {
    mongo: Database,
}

impl TaskService {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    /// Tasks for the user behind a messaging id, newest first. An unknown
    /// user yields an empty list; the read path does not distinguish an
    /// absent user from a user with zero tasks, and never creates one.
    pub async fn list_for_tg(&self, tg_id: i64) -> Result<Vec<TaskView>, ServiceError> {
        let users = self.mongo.collection::<User>("users");
        let Some(user) = users.find_one(doc! { "tg_id": tg_id }).await? else {
            return Ok(Vec::new());
        };
        let user_id = user.id.ok_or(ServiceError::NotFound("user"))?;

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();
        let mut cursor = self
            .mongo
            .collection::<TodoTask>("tasks")
            .find(doc! { "user_id": user_id })
            .with_options(options)
            .await?;

        let mut tasks = Vec::new();
        while let Some(task) = cursor.try_next().await? {
            tasks.push(TaskView::from(task));
        }

        Ok(tasks)
    }

    pub async fn create(&self, user_id: ObjectId, title: &str) -> Result<TaskView, ServiceError> {
        let task = TodoTask::new(user_id, title);

        self.mongo
            .collection::<TodoTask>("tasks")
            .insert_one(&task)
            .await?;

        TASKS_CREATED_TOTAL.inc();
        tracing::info!(user_id = %user_id, task_id = %task.id, "Created task");

        Ok(TaskView::from(task))
    }

    /// One-way false -> true transition. Completing an already-completed
    /// task is a no-op that still returns the task.
    pub async fn complete(&self, task_id: ObjectId) -> Result<TaskView, ServiceError> {
        let task = self
            .mongo
            .collection::<TodoTask>("tasks")
            .find_one_and_update(doc! { "_id": task_id }, doc! { "$set": { "completed": true } })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ServiceError::NotFound("task"))?;

        Ok(TaskView::from(task))
    }
}
