use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Database;

use super::error::ServiceError;
use crate::models::{Subject, User, UserStats};

/// Aggregate counts over the append-only solutions log.
pub struct StatsService {
    mongo: Database,
}

impl StatsService {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    /// Score, level and solved counts for one user. Counts are correct
    /// submissions, so re-solving a problem counts again; users with no
    /// matching rows get zeroes, never nulls.
    pub async fn stats_for_user(&self, user: &User) -> Result<UserStats, ServiceError> {
        let user_id = user.id.ok_or(ServiceError::NotFound("user"))?;

        let solutions = self.mongo.collection::<Document>("solutions");
        let solved_count = solutions
            .count_documents(doc! { "user_id": user_id, "is_correct": true })
            .await?;

        let math_solved = self.solved_in_subject(user_id, Subject::Math).await?;
        let informatics_solved = self
            .solved_in_subject(user_id, Subject::Informatics)
            .await?;

        Ok(UserStats {
            score: user.score,
            level: user.level,
            solved_count,
            math_solved,
            informatics_solved,
        })
    }

    /// Correct submissions joined to the problem's subject via $lookup.
    async fn solved_in_subject(
        &self,
        user_id: ObjectId,
        subject: Subject,
    ) -> Result<u64, ServiceError> {
        let pipeline = vec![
            doc! { "$match": { "user_id": user_id, "is_correct": true } },
            doc! { "$lookup": {
                "from": "problems",
                "localField": "problem_id",
                "foreignField": "_id",
                "as": "problem",
            } },
            doc! { "$unwind": "$problem" },
            doc! { "$match": { "problem.subject": subject.as_str() } },
            doc! { "$count": "solved" },
        ];

        let solutions = self.mongo.collection::<Document>("solutions");
        let mut cursor = solutions.aggregate(pipeline).await?;

        // An empty pipeline result means zero matches; $count emits no document
        let count = match cursor.try_next().await? {
            Some(result) => result.get_i32("solved").unwrap_or_default() as u64,
            None => 0,
        };

        Ok(count)
    }
}
