use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::{
    models::{ListProblemsQuery, ProblemSummary},
    services::{problem_service::ProblemService, AppState},
};

/// GET /api/problems?subject=&difficulty= - filterable catalog listing
pub async fn list_problems(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProblemsQuery>,
) -> Result<Json<Vec<ProblemSummary>>, ApiError> {
    let service = ProblemService::new(state.mongo.clone());
    let problems = service
        .list(query.subject.as_deref(), query.difficulty.as_deref())
        .await?;

    Ok(Json(problems))
}
