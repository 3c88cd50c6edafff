use crate::AppState;
use crate::db::models::{ApiResponse, MessageFilter, NewMessage, PageParams};
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::services::MessagesService;
use crate::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewMessage>,
) -> Result<impl IntoResponse, AppError> {
    let message = state
        .with_conn(move |conn| MessagesService::create(conn, payload))
        .await?;

    let response = ApiResponse::created(message, "Message sent successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_messages(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MessageFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = state
        .with_conn(move |conn| MessagesService::list(conn, &filter, &params))
        .await?;

    Ok(Json(page.into_response(&params, "Messages retrieved successfully")))
}

pub async fn get_message(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = state
        .with_conn(move |conn| MessagesService::get(conn, message_id))
        .await?;

    Ok(Json(ApiResponse::success(message, "Message retrieved successfully")))
}

pub async fn toggle_read(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = state
        .with_conn(move |conn| MessagesService::toggle_read(conn, message_id))
        .await?;

    Ok(Json(ApiResponse::success(message, "Message updated successfully")))
}

pub async fn delete_message(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .with_conn(move |conn| MessagesService::delete(conn, message_id))
        .await?;

    Ok(Json(ApiResponse::<()>::ok("Message deleted successfully")))
}
