pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validation;

use crate::cache::SummaryCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::middleware::{JwtService, auth_middleware, request_tracking_middleware};
use crate::utils::UploadStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
};
use diesel::PgConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub uploads: UploadStore,
    pub jwt: JwtService,
    pub cache: SummaryCache,
}

impl AppState {
    pub fn new(db: DbPool, redis: redis::Client, config: Config) -> Self {
        let uploads = UploadStore::new(&config.uploads());
        let jwt = JwtService::new(&config.auth());
        let cache = SummaryCache::new(redis.clone(), config.summary_cache_ttl);
        Self {
            db,
            redis,
            config: Arc::new(config),
            uploads,
            jwt,
            cache,
        }
    }

    /// Runs blocking diesel work on the blocking pool with a pooled connection.
    pub async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let pool = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut *conn)
        })
        .await
        .map_err(|e| AppError::internal(format!("Database task failed: {}", e)))?
    }
}

pub fn init_tracing(config: &Config) {
    let level = match config.log_level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);
    match config.log_format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Assembles the full application. Kept separate from `main` so tests can
/// serve it on an ephemeral port.
pub fn build_app(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.uploads.root());
    let body_limit = state.config.max_upload_bytes;
    let cors = cors_layer(&state.config.cors_origins);

    routes::create_router()
        .nest_service(utils::uploads::PUBLIC_PREFIX, uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware))
}
