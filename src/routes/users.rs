use crate::AppState;
use crate::db::models::{ApiResponse, ResponseMeta, UpdateActiveRequest, UpdateRoleRequest};
use crate::error::AppError;
use crate::middleware::SuperAdminUser;
use crate::services::UsersService;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_users(
    SuperAdminUser(_): SuperAdminUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.with_conn(UsersService::list).await?;

    let meta = ResponseMeta {
        total_count: Some(users.len() as i64),
        ..Default::default()
    };
    Ok(Json(ApiResponse::success_with_meta(
        users,
        "Users retrieved successfully",
        meta,
    )))
}

pub async fn update_role(
    SuperAdminUser(actor): SuperAdminUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .with_conn(move |conn| UsersService::update_role(conn, &actor, user_id, payload.role))
        .await?;

    Ok(Json(ApiResponse::success(user, "User role updated successfully")))
}

pub async fn update_active(
    SuperAdminUser(actor): SuperAdminUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateActiveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .with_conn(move |conn| UsersService::set_active(conn, &actor, user_id, payload.is_active))
        .await?;

    Ok(Json(ApiResponse::success(user, "User status updated successfully")))
}

pub async fn delete_user(
    SuperAdminUser(actor): SuperAdminUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .with_conn(move |conn| UsersService::delete(conn, &actor, user_id))
        .await?;

    Ok(Json(ApiResponse::<()>::ok("User deleted successfully")))
}
