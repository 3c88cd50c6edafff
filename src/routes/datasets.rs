//! Handlers shared by every dashboard dataset. Each dataset mounts the same
//! router, parameterised by its [`DatasetService`].

use crate::AppState;
use crate::cache::Lookup;
use crate::db::models::{ApiResponse, DatasetFilter, ImportSummary, ResponseMeta};
use crate::error::AppError;
use crate::middleware::{AdminUser, CurrentUser};
use crate::services::DatasetService;
use crate::utils::{FormData, UploadKind};
use crate::validation::ValidatedJson;
use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

pub fn dataset_routes<S: DatasetService>() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_records::<S>).post(create_record::<S>))
        .route("/summary", get(summary::<S>))
        .route("/upload", post(upload_spreadsheet::<S>))
        .route(
            "/:id",
            get(get_record::<S>)
                .patch(update_record::<S>)
                .delete(delete_record::<S>),
        )
}

async fn list_records<S: DatasetService>(
    CurrentUser(_): CurrentUser,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DatasetFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.with_conn(move |conn| S::list(conn, &filter)).await?;

    let meta = ResponseMeta {
        total_count: Some(rows.len() as i64),
        ..Default::default()
    };
    Ok(Json(ApiResponse::success_with_meta(
        rows,
        &format!("{} records retrieved successfully", S::RESOURCE),
        meta,
    )))
}

async fn get_record<S: DatasetService>(
    CurrentUser(_): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.with_conn(move |conn| S::get(conn, id)).await?;

    Ok(Json(ApiResponse::success(
        row,
        &format!("{} retrieved successfully", S::LABEL),
    )))
}

async fn create_record<S: DatasetService>(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<S::Input>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.with_conn(move |conn| S::create(conn, input)).await?;
    state.cache.invalidate(S::RESOURCE).await;

    let response = ApiResponse::created(row, &format!("{} created successfully", S::LABEL));
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_record<S: DatasetService>(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(changes): ValidatedJson<S::Changes>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.with_conn(move |conn| S::modify(conn, id, changes)).await?;
    state.cache.invalidate(S::RESOURCE).await;

    Ok(Json(ApiResponse::success(
        row,
        &format!("{} updated successfully", S::LABEL),
    )))
}

async fn delete_record<S: DatasetService>(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.with_conn(move |conn| S::delete(conn, id)).await?;
    state.cache.invalidate(S::RESOURCE).await;

    Ok(Json(ApiResponse::<()>::ok(&format!(
        "{} deleted successfully",
        S::LABEL
    ))))
}

/// `multipart/form-data` with a single CSV under `file`. All rows or none.
async fn upload_spreadsheet<S: DatasetService>(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::validation("No file uploaded"))?;
    UploadKind::Spreadsheet.check_file_name(&file.file_name)?;

    tracing::info!(
        resource = S::RESOURCE,
        file = %file.file_name,
        bytes = file.bytes.len(),
        uploaded_by = %admin.email,
        "Spreadsheet import started"
    );
    let inserted = state
        .with_conn(move |conn| S::import(conn, &file.bytes))
        .await?;
    state.cache.invalidate(S::RESOURCE).await;

    let response = ApiResponse::created(
        ImportSummary { inserted },
        &format!("Imported {} {} rows", inserted, S::RESOURCE),
    );
    Ok((StatusCode::CREATED, Json(response)))
}

async fn summary<S: DatasetService>(
    CurrentUser(_): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let message = format!("{} summary retrieved successfully", S::LABEL);
    let generation = match state.cache.get::<S::Summary>(S::RESOURCE).await {
        Lookup::Hit(cached) => return Ok(Json(ApiResponse::success(cached, &message))),
        Lookup::Miss(generation) => generation,
    };

    let summary = state.with_conn(S::summary).await?;
    if let Some(generation) = generation {
        state.cache.put(S::RESOURCE, generation, &summary).await;
    }

    Ok(Json(ApiResponse::success(summary, &message)))
}
