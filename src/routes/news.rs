use crate::AppState;
use crate::db::models::{ApiResponse, NewsFilter, NewsForm, PageParams};
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::routes::discard_upload_on_error;
use crate::services::NewsService;
use crate::utils::{FormData, UploadKind};
use crate::validation::news::{validate_create_news, validate_update_news};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_published(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<NewsFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = state
        .with_conn(move |conn| NewsService::list(conn, &filter, true, &params))
        .await?;

    Ok(Json(page.into_response(&params, "News retrieved successfully")))
}

/// Drafts included.
pub async fn list_all(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<NewsFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = state
        .with_conn(move |conn| NewsService::list(conn, &filter, false, &params))
        .await?;

    Ok(Json(page.into_response(&params, "News retrieved successfully")))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let news = state
        .with_conn(move |conn| NewsService::get_published(conn, news_id))
        .await?;

    Ok(Json(ApiResponse::success(news, "News retrieved successfully")))
}

pub async fn create_news(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields = NewsForm::from_form(&form)?;
    // 先校验字段，避免为无效请求写入图片
    validate_create_news(&fields)?;

    let image_path = match form.take_file("image") {
        Some(file) => Some(state.uploads.save(UploadKind::NewsImage, &file).await?),
        None => None,
    };

    let stored = image_path.clone();
    let result = state
        .with_conn(move |conn| NewsService::create(conn, fields, stored))
        .await;
    let news = discard_upload_on_error(&state.uploads, image_path.as_deref(), result).await?;

    tracing::info!(news_id = %news.id, author = %admin.email, "News post created");
    let response = ApiResponse::created(news, "News created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_news(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormData::from_multipart(multipart).await?;
    let fields = NewsForm::from_form(&form)?;
    let image = form.take_file("image");
    validate_update_news(&fields, image.is_some())?;

    let image_path = match image {
        Some(file) => Some(state.uploads.save(UploadKind::NewsImage, &file).await?),
        None => None,
    };

    let stored = image_path.clone();
    let result = state
        .with_conn(move |conn| NewsService::update(conn, news_id, fields, stored))
        .await;
    let update = discard_upload_on_error(&state.uploads, image_path.as_deref(), result).await?;

    if let Some(old_image) = &update.replaced_image {
        state.uploads.remove_quietly(old_image).await;
    }

    Ok(Json(ApiResponse::success(update.news, "News updated successfully")))
}

pub async fn toggle_publish(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let news = state
        .with_conn(move |conn| NewsService::toggle_publish(conn, news_id))
        .await?;

    let message = if news.is_published {
        "News published successfully"
    } else {
        "News unpublished successfully"
    };
    Ok(Json(ApiResponse::success(news, message)))
}

pub async fn delete_news(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(news_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let news = state
        .with_conn(move |conn| NewsService::delete(conn, news_id))
        .await?;

    if let Some(image) = &news.image_path {
        state.uploads.remove_quietly(image).await;
    }

    Ok(Json(ApiResponse::<()>::ok("News deleted successfully")))
}
