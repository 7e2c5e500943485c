use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bson_datetime_as_chrono;

/// User model stored in the MongoDB "users" collection.
///
/// A user is keyed either by a messaging-platform id (`tg_id`) or by email
/// with a bcrypt password hash. Both keys are optional but unique when
/// present (sparse unique indexes, created at startup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(with = "bson_datetime_as_chrono")]
    pub created_at: DateTime<Utc>,
}

fn default_level() -> i32 {
    1
}

impl User {
    /// Fresh account resolved from a messaging-platform id.
    pub fn new_telegram(tg_id: i64) -> Self {
        Self {
            id: Some(ObjectId::new()),
            tg_id: Some(tg_id),
            email: None,
            password_hash: None,
            name: None,
            score: 0,
            level: 1,
            created_at: Utc::now(),
        }
    }

    /// Fresh account registered with email credentials.
    pub fn new_email(email: &str, password_hash: String, name: Option<String>) -> Self {
        Self {
            id: Some(ObjectId::new()),
            tg_id: None,
            email: Some(email.to_string()),
            password_hash: Some(password_hash),
            name,
            score: 0,
            level: 1,
            created_at: Utc::now(),
        }
    }
}

/// User profile returned to the client (without the password hash).
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tg_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub score: i64,
    pub level: i32,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            tg_id: user.tg_id,
            email: user.email,
            name: user.name,
            score: user.score,
            level: user.level,
        }
    }
}

/// Request to register a new user with email credentials
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
}

/// Request to login with email credentials
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}
