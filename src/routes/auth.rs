use crate::AppState;
use crate::db::models::{ApiResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::AuthService;
use crate::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cost = state.config.bcrypt_cost;
    let profile = state
        .with_conn(move |conn| AuthService::register(conn, &payload, cost))
        .await?;

    let response = ApiResponse::created(profile, "User registered successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let jwt = state.jwt.clone();
    let login = state
        .with_conn(move |conn| AuthService::login(conn, &jwt, &payload))
        .await?;

    Ok(Json(ApiResponse::success(login, "Login successful")))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .with_conn(move |conn| AuthService::get_profile(conn, user.id))
        .await?;

    Ok(Json(ApiResponse::success(profile, "Profile retrieved successfully")))
}
