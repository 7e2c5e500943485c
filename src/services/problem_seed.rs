use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::Database;

use crate::models::{Difficulty, Problem, Subject};

/// Seeds the problem catalog on first startup. Runs once: any existing
/// problem document skips the whole pass, so redeployments never duplicate
/// or overwrite catalog content.
pub async fn bootstrap(mongo: &Database) -> Result<()> {
    let problems = mongo.collection::<Problem>("problems");

    let existing = problems
        .find_one(doc! {})
        .await
        .context("Failed to probe problems collection")?;
    if existing.is_some() {
        tracing::debug!("Problem catalog already populated, seed skipped");
        return Ok(());
    }

    let seed = sample_problems();
    let count = seed.len();
    problems
        .insert_many(&seed)
        .await
        .context("Failed to insert seed problems")?;

    tracing::info!(count, "Seeded problem catalog");
    Ok(())
}

fn sample_problems() -> Vec<Problem> {
    vec![
        Problem::new(
            "Quadratic equation",
            "Solve the equation: x² - 5x + 6 = 0",
            Subject::Math,
            Difficulty::Easy,
            "2;3",
            10,
        ),
        Problem::new(
            "Triangle area",
            "Find the area of a triangle with sides 5, 12, 13",
            Subject::Math,
            Difficulty::Medium,
            "30",
            20,
        ),
        Problem::new(
            "Binary search",
            "What is the time complexity of binary search?",
            Subject::Informatics,
            Difficulty::Easy,
            "O(log n)",
            10,
        ),
        Problem::new(
            "Sorting algorithms",
            "Which sorting algorithm has O(n²) worst-case complexity?",
            Subject::Informatics,
            Difficulty::Medium,
            "bubble sort",
            20,
        ),
    ]
}
