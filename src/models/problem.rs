use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Problem category. Unknown values in catalog filters are ignored rather
/// than rejected, so parsing goes through [`Subject::parse`] instead of a
/// serde-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Informatics,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Informatics => "informatics",
        }
    }

    /// Lenient parse: anything unrecognized is None (filter dimension dropped).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "math" => Some(Subject::Math),
            "informatics" => Some(Subject::Informatics),
            _ => None,
        }
    }
}

/// Difficulty tag. Informational only, never enters the scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Problem stored in the "problems" collection. Seeded at startup, read-only
/// to the API afterwards.
///
/// `correct_answer` may encode several acceptable values separated by `;` or
/// `,` (e.g. the roots "2;3" of a quadratic). Matching semantics live in
/// `services::solution_service`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub correct_answer: String,
    #[serde(default = "default_points")]
    pub points: i32,
}

fn default_points() -> i32 {
    10
}

impl Problem {
    pub fn new(
        title: &str,
        description: &str,
        subject: Subject,
        difficulty: Difficulty,
        correct_answer: &str,
        points: i32,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.to_string(),
            description: description.to_string(),
            subject,
            difficulty,
            correct_answer: correct_answer.to_string(),
            points,
        }
    }
}

/// Catalog listing entry returned to the client. The correct answer never
/// leaves the server through this type.
#[derive(Debug, Serialize)]
pub struct ProblemSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub points: i32,
}

impl From<Problem> for ProblemSummary {
    fn from(problem: Problem) -> Self {
        ProblemSummary {
            id: problem.id.to_hex(),
            title: problem.title,
            description: problem.description,
            subject: problem.subject,
            difficulty: problem.difficulty,
            points: problem.points,
        }
    }
}

/// Query params for GET /api/problems. Both filters optional and independent.
#[derive(Debug, Deserialize)]
pub struct ListProblemsQuery {
    pub subject: Option<String>,
    pub difficulty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_parse_is_lenient() {
        assert_eq!(Subject::parse("math"), Some(Subject::Math));
        assert_eq!(Subject::parse("informatics"), Some(Subject::Informatics));
        assert_eq!(Subject::parse("history"), None);
        assert_eq!(Subject::parse(""), None);
        // Case-sensitive on purpose: stored values are canonical lowercase
        assert_eq!(Subject::parse("Math"), None);
    }

    #[test]
    fn difficulty_parse_is_lenient() {
        assert_eq!(Difficulty::parse("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }

    #[test]
    fn enum_str_round_trips_through_parse() {
        for subject in [Subject::Math, Subject::Informatics] {
            assert_eq!(Subject::parse(subject.as_str()), Some(subject));
        }
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(difficulty.as_str()), Some(difficulty));
        }
    }
}
