pub mod applications;
pub mod auth;
pub mod datasets;
pub mod health;
pub mod jobs;
pub mod messages;
pub mod news;
pub mod users;

use crate::AppState;
use crate::error::AppResult;
use crate::services::datasets::{
    DemographicsService, EngagementService, HiringService, HrOperationsService, LeaversService,
    MetricsService, PayrollService, TrainingService,
};
use crate::utils::UploadStore;
use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

/// Every API route. Access control lives in the handlers' extractors, so
/// public and protected routes share one router behind the soft auth layer.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::list_users))
        .route("/users/:user_id", axum::routing::delete(users::delete_user))
        .route("/users/:user_id/role", patch(users::update_role))
        .route("/users/:user_id/active", patch(users::update_active))
        .route("/news", get(news::list_published).post(news::create_news))
        .route("/news/all", get(news::list_all))
        .route(
            "/news/:news_id",
            get(news::get_news)
                .patch(news::update_news)
                .delete(news::delete_news),
        )
        .route("/news/:news_id/publish", patch(news::toggle_publish))
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/:job_id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/applications",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route("/applications/summary", get(applications::applications_summary))
        .route(
            "/applications/:application_id",
            get(applications::get_application).delete(applications::delete_application),
        )
        .route(
            "/applications/:application_id/status",
            patch(applications::update_application_status),
        )
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/:message_id",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/messages/:message_id/read", patch(messages::toggle_read))
        .nest("/hiring", datasets::dataset_routes::<HiringService>())
        .nest("/leavers", datasets::dataset_routes::<LeaversService>())
        .nest("/payroll", datasets::dataset_routes::<PayrollService>())
        .nest("/training", datasets::dataset_routes::<TrainingService>())
        .nest("/engagement", datasets::dataset_routes::<EngagementService>())
        .nest("/demographics", datasets::dataset_routes::<DemographicsService>())
        .nest("/hr-operations", datasets::dataset_routes::<HrOperationsService>())
        .nest("/metrics", datasets::dataset_routes::<MetricsService>())
}

/// Drops a freshly stored upload when the database write that should have
/// referenced it failed.
pub(crate) async fn discard_upload_on_error<T>(
    uploads: &UploadStore,
    stored: Option<&str>,
    result: AppResult<T>,
) -> AppResult<T> {
    if result.is_err() {
        if let Some(path) = stored {
            uploads.remove_quietly(path).await;
        }
    }
    result
}
