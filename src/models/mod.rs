pub mod problem;
pub mod solution;
pub mod task;
pub mod user;

pub use problem::{Difficulty, ListProblemsQuery, Problem, ProblemSummary, Subject};
pub use solution::{SolutionRecord, SolveRequest, SolveResponse, UserStats};
pub use task::{CreateTaskRequest, TaskView, TodoTask};
pub use user::{LoginRequest, RegisterRequest, User, UserProfile};

// Serde converter for chrono::DateTime <-> mongodb::bson::DateTime. Documents
// store native BSON dates (sortable, indexable); responses use chrono directly.
pub(crate) mod bson_datetime_as_chrono {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bson_dt = bson::DateTime::from_millis(date.timestamp_millis());
        bson_dt.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bson_dt = bson::DateTime::deserialize(deserializer)?;
        DateTime::from_timestamp_millis(bson_dt.timestamp_millis())
            .ok_or_else(|| serde::de::Error::custom("BSON datetime out of chrono range"))
    }
}
