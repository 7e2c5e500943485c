use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::bson_datetime_as_chrono;

/// One submission, stored append-only in the "solutions" collection. A user
/// may submit the same problem any number of times; every attempt gets its
/// own document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: ObjectId,
    pub problem_id: ObjectId,
    pub answer: String,
    pub is_correct: bool,
    #[serde(with = "bson_datetime_as_chrono")]
    pub submitted_at: DateTime<Utc>,
}

/// Body of POST /api/solve. A missing answer field is treated as an empty
/// submission, not a request error.
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    pub tg_id: i64,
    pub problem_id: String,
    #[serde(default)]
    pub answer: String,
}

/// Verdict returned for a submission. `correct_answer` carries the raw stored
/// answer string only when the submission was wrong; a correct submission
/// gets null.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub correct: bool,
    pub correct_answer: Option<String>,
    pub points_earned: i32,
    pub new_score: i64,
}

/// Aggregate stats for GET /api/stats/{tg_id}. Counts are submissions with
/// is_correct = true, not distinct problems.
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub score: i64,
    pub level: i32,
    pub solved_count: u64,
    pub math_solved: u64,
    pub informatics_solved: u64,
}
