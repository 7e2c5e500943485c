use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{LoginRequest, RegisterRequest, UserProfile},
    services::{user_service::UserService, AppState},
};

/// POST /api/auth/register - register a new user with email credentials
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::bad_request(format!("Validation error: {}", e)));
    }

    tracing::info!(email = %req.email, "Registering new user");

    let service = UserService::new(state.mongo.clone());
    let user = service
        .register_by_email(&req.email, &req.password, req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

/// POST /api/auth/login - verify email credentials
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::bad_request(format!("Validation error: {}", e)));
    }

    let service = UserService::new(state.mongo.clone());
    let user = service.check_credentials(&req.email, &req.password).await?;

    tracing::info!(email = %req.email, "Successful login");

    Ok(Json(UserProfile::from(user)))
}
