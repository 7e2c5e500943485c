use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{SolveRequest, SolveResponse, UserStats},
    services::{
        solution_service::SolutionService, stats_service::StatsService,
        user_service::UserService, AppState,
    },
};

/// POST /api/solve - judge a submission and apply score/level updates.
/// The user is resolved (or created) from the messaging id before judging.
pub async fn submit_solution(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SolveRequest>,
) -> Result<Json<SolveResponse>, ApiError> {
    let problem_id = ObjectId::parse_str(&req.problem_id)
        .map_err(|_| ApiError::bad_request("Invalid problem id"))?;

    let users = UserService::new(state.mongo.clone());
    let user = users.resolve_or_create_by_tg(req.tg_id).await?;

    let service = SolutionService::new(state.client.clone(), state.mongo.clone());
    let verdict = service.submit(&user, problem_id, &req.answer).await?;

    Ok(Json(verdict))
}

/// GET /api/stats/{tg_id} - aggregate stats for one user
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    Path(tg_id): Path<i64>,
) -> Result<Json<UserStats>, ApiError> {
    let users = UserService::new(state.mongo.clone());
    let user = users
        .find_by_tg(tg_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let service = StatsService::new(state.mongo.clone());
    let stats = service.stats_for_user(&user).await?;

    Ok(Json(stats))
}
