use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Database;

use super::error::ServiceError;
use crate::models::{Difficulty, Problem, ProblemSummary, Subject};

/// Read-only catalog over the seeded "problems" collection.
pub struct ProblemService {
    mongo: Database,
}

impl ProblemService {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    /// Lists problems, optionally filtered by subject and/or difficulty. An
    /// unrecognized filter value drops that dimension instead of erroring.
    pub async fn list(
        &self,
        subject: Option<&str>,
        difficulty: Option<&str>,
    ) -> Result<Vec<ProblemSummary>, ServiceError> {
        let mut filter = Document::new();

        if let Some(subject) = subject.and_then(Subject::parse) {
            filter.insert("subject", subject.as_str());
        }
        if let Some(difficulty) = difficulty.and_then(Difficulty::parse) {
            filter.insert("difficulty", difficulty.as_str());
        }

        let problems = self.mongo.collection::<Problem>("problems");
        let mut cursor = problems.find(filter).await?;

        let mut summaries = Vec::new();
        while let Some(problem) = cursor.try_next().await? {
            summaries.push(ProblemSummary::from(problem));
        }

        Ok(summaries)
    }
}
