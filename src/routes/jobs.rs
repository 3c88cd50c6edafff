use crate::AppState;
use crate::db::models::{ApiResponse, JobFilter, NewJob, ResponseMeta, UpdateJob};
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::routes::applications::APPLICATIONS_RESOURCE;
use crate::services::JobsService;
use crate::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<JobFilter>,
) -> Result<impl IntoResponse, AppError> {
    let jobs = state
        .with_conn(move |conn| JobsService::list(conn, &filter))
        .await?;

    let meta = ResponseMeta {
        total_count: Some(jobs.len() as i64),
        ..Default::default()
    };
    Ok(Json(ApiResponse::success_with_meta(
        jobs,
        "Jobs retrieved successfully",
        meta,
    )))
}

pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let job = state
        .with_conn(move |conn| JobsService::get(conn, job_id))
        .await?;

    Ok(Json(ApiResponse::success(job, "Job retrieved successfully")))
}

pub async fn create_job(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewJob>,
) -> Result<impl IntoResponse, AppError> {
    let today = JobsService::today();
    let job = state
        .with_conn(move |conn| JobsService::create(conn, payload, today))
        .await?;

    let response = ApiResponse::created(job, "Job created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_job(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateJob>,
) -> Result<impl IntoResponse, AppError> {
    let job = state
        .with_conn(move |conn| JobsService::update(conn, job_id, payload))
        .await?;
    // 申请汇总里带有职位名称
    state.cache.invalidate(APPLICATIONS_RESOURCE).await;

    Ok(Json(ApiResponse::success(job, "Job updated successfully")))
}

pub async fn delete_job(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resumes = state
        .with_conn(move |conn| JobsService::delete(conn, job_id))
        .await?;

    // 申请记录已随职位级联删除，清理对应的简历文件
    join_all(resumes.iter().map(|resume| state.uploads.remove_quietly(resume))).await;
    state.cache.invalidate(APPLICATIONS_RESOURCE).await;

    Ok(Json(ApiResponse::<()>::ok("Job deleted successfully")))
}
