use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Liveness probe; never touches the database.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
