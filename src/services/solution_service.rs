use std::collections::HashSet;

use chrono::Utc;
use lazy_static::lazy_static;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client as MongoClient, ClientSession, Database};
use regex::Regex;
use uuid::Uuid;

use super::error::ServiceError;
use crate::metrics::ANSWERS_SUBMITTED_TOTAL;
use crate::models::{Problem, SolutionRecord, SolveResponse, User};
use crate::utils::retry::{retry_async_with_config, RetryConfig};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Points needed per level. A user's level is always score / 100 + 1.
const POINTS_PER_LEVEL: i64 = 100;

/// Canonical form of a free-text answer: every whitespace run removed
/// (internal included), lowercased, decimal comma unified to a dot.
/// Total over any input and idempotent.
pub fn normalize_answer(raw: &str) -> String {
    WHITESPACE
        .replace_all(raw, "")
        .to_lowercase()
        .replace(',', ".")
}

/// The normalized set of alternatives encoded in a delimited answer string.
/// Parts are split on `;` or `,` and empty raw parts are dropped.
fn answer_variants(raw: &str) -> HashSet<String> {
    raw.split([';', ','])
        .filter(|part| !part.is_empty())
        .map(normalize_answer)
        .collect()
}

/// Whether a submitted answer is equivalent to the stored correct answer.
///
/// A correct answer containing `;` or `,` is a set of acceptable values; the
/// submission is split the same way and compared by exact set equality, so
/// "2;3" matches "3;2" but a lone "2" does not match "2;3" (no subset match).
/// Without delimiters both sides compare as normalized scalars.
pub fn answers_match(submitted: &str, correct: &str) -> bool {
    if correct.contains([';', ',']) {
        answer_variants(submitted) == answer_variants(correct)
    } else {
        normalize_answer(submitted) == normalize_answer(correct)
    }
}

pub fn level_for_score(score: i64) -> i32 {
    (score / POINTS_PER_LEVEL + 1) as i32
}

/// Judges submissions and applies score/level updates. The attempt record and
/// the user mutation commit in one transaction; a wrong answer records the
/// attempt and mutates nothing else.
pub struct SolutionService {
    client: MongoClient,
    mongo: Database,
}

impl SolutionService {
    pub fn new(client: MongoClient, mongo: Database) -> Self {
        Self { client, mongo }
    }

    /// Judge `answer` against the problem and persist the outcome.
    ///
    /// NotFound for an unresolvable problem (or a user deleted mid-flight)
    /// leaves no attempt record behind.
    pub async fn submit(
        &self,
        user: &User,
        problem_id: ObjectId,
        answer: &str,
    ) -> Result<SolveResponse, ServiceError> {
        let user_id = user.id.ok_or(ServiceError::NotFound("user"))?;
        let retry_cfg = RetryConfig::default();

        let problems = self.mongo.collection::<Problem>("problems");
        let problem = retry_async_with_config(retry_cfg, || async {
            problems.find_one(doc! { "_id": problem_id }).await
        })
        .await?
        .ok_or(ServiceError::NotFound("problem"))?;

        let is_correct = answers_match(answer, &problem.correct_answer);

        let record = SolutionRecord {
            id: Uuid::new_v4().to_string(),
            user_id,
            problem_id,
            answer: answer.to_string(),
            is_correct,
            submitted_at: Utc::now(),
        };

        let new_score = self
            .persist_attempt(&record, is_correct, problem.points, user.score)
            .await?;

        let correct_label = if is_correct { "true" } else { "false" };
        ANSWERS_SUBMITTED_TOTAL
            .with_label_values(&[correct_label])
            .inc();

        tracing::info!(
            user_id = %user_id,
            problem_id = %problem_id,
            correct = is_correct,
            new_score,
            "Solution attempt recorded"
        );

        Ok(SolveResponse {
            correct: is_correct,
            correct_answer: if is_correct {
                None
            } else {
                Some(problem.correct_answer)
            },
            points_earned: if is_correct { problem.points } else { 0 },
            new_score,
        })
    }

    /// Attempt insert plus (for a correct answer) score/level update, in one
    /// transaction. Partial application is the bug this boundary prevents.
    async fn persist_attempt(
        &self,
        record: &SolutionRecord,
        is_correct: bool,
        points: i32,
        current_score: i64,
    ) -> Result<i64, ServiceError> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        match self
            .apply_in_transaction(&mut session, record, is_correct, points)
            .await
        {
            Ok(updated_score) => {
                session.commit_transaction().await?;
                Ok(updated_score.unwrap_or(current_score))
            }
            Err(err) => {
                // Best effort; an unreachable server aborts the txn on expiry anyway
                let _ = session.abort_transaction().await;
                Err(err)
            }
        }
    }

    async fn apply_in_transaction(
        &self,
        session: &mut ClientSession,
        record: &SolutionRecord,
        is_correct: bool,
        points: i32,
    ) -> Result<Option<i64>, ServiceError> {
        let mut updated_score = None;

        if is_correct {
            let users = self.mongo.collection::<User>("users");
            let updated = users
                .find_one_and_update(
                    doc! { "_id": record.user_id },
                    doc! { "$inc": { "score": i64::from(points) } },
                )
                .return_document(ReturnDocument::After)
                .session(&mut *session)
                .await?
                .ok_or(ServiceError::NotFound("user"))?;

            users
                .update_one(
                    doc! { "_id": record.user_id },
                    doc! { "$set": { "level": level_for_score(updated.score) } },
                )
                .session(&mut *session)
                .await?;

            updated_score = Some(updated.score);
        }

        let solutions = self.mongo.collection::<SolutionRecord>("solutions");
        solutions
            .insert_one(record)
            .session(&mut *session)
            .await?;

        Ok(updated_score)
    }
}
