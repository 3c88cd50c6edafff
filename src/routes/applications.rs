use crate::AppState;
use crate::cache::Lookup;
use crate::db::models::{
    ApiResponse, ApplicationFilter, ApplicationForm, ApplicationsSummary, PageParams,
    UpdateApplicationStatusRequest,
};
use crate::error::AppError;
use crate::middleware::{AdminUser, CurrentUser};
use crate::routes::discard_upload_on_error;
use crate::services::{ApplicationsService, JobsService};
use crate::utils::{FormData, UploadKind};
use crate::validation::describe_errors;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Cache key suffix for the applications summary.
pub const APPLICATIONS_RESOURCE: &str = "applications";

pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields = ApplicationForm::from_form(&form)?;
    fields
        .validate()
        .map_err(|errors| AppError::validation(describe_errors(&errors)))?;

    let today = JobsService::today();
    let job_id = fields.job_id;
    state
        .with_conn(move |conn| ApplicationsService::ensure_open_job(conn, job_id, today))
        .await?;

    let resume_path = match form.take_file("resume") {
        Some(file) => Some(state.uploads.save(UploadKind::Resume, &file).await?),
        None => None,
    };

    let stored = resume_path.clone();
    let result = state
        .with_conn(move |conn| ApplicationsService::submit(conn, fields, stored, today))
        .await;
    let application =
        discard_upload_on_error(&state.uploads, resume_path.as_deref(), result).await?;
    state.cache.invalidate(APPLICATIONS_RESOURCE).await;

    let response = ApiResponse::created(application, "Application submitted successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_applications(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ApplicationFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = state
        .with_conn(move |conn| ApplicationsService::list(conn, &filter, &params))
        .await?;

    Ok(Json(page.into_response(&params, "Applications retrieved successfully")))
}

pub async fn get_application(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let application = state
        .with_conn(move |conn| ApplicationsService::get(conn, application_id))
        .await?;

    Ok(Json(ApiResponse::success(application, "Application retrieved successfully")))
}

pub async fn update_application_status(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let application = state
        .with_conn(move |conn| {
            ApplicationsService::update_status(conn, application_id, payload.status)
        })
        .await?;
    state.cache.invalidate(APPLICATIONS_RESOURCE).await;

    Ok(Json(ApiResponse::success(application, "Application status updated successfully")))
}

pub async fn delete_application(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let application = state
        .with_conn(move |conn| ApplicationsService::delete(conn, application_id))
        .await?;

    if let Some(resume) = &application.resume_path {
        state.uploads.remove_quietly(resume).await;
    }
    state.cache.invalidate(APPLICATIONS_RESOURCE).await;

    Ok(Json(ApiResponse::<()>::ok("Application deleted successfully")))
}

pub async fn applications_summary(
    CurrentUser(_): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let generation = match state.cache.get::<ApplicationsSummary>(APPLICATIONS_RESOURCE).await {
        Lookup::Hit(summary) => {
            return Ok(Json(ApiResponse::success(summary, "Summary retrieved successfully")));
        }
        Lookup::Miss(generation) => generation,
    };

    let summary = state.with_conn(ApplicationsService::summary).await?;
    if let Some(generation) = generation {
        state.cache.put(APPLICATIONS_RESOURCE, generation, &summary).await;
    }

    Ok(Json(ApiResponse::success(summary, "Summary retrieved successfully")))
}
