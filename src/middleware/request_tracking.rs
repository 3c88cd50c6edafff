use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{Instrument, info, warn};
use uuid::Uuid;

/// 请求ID头部名称
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests slower than this are logged at warn level.
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

/// 请求追踪中间件
/// Propagates or assigns `x-request-id` and logs one line per request.
pub async fn request_tracking_middleware<B>(mut request: Request<B>, next: Next<B>) -> Response {
    let start_time = Instant::now();
    let request_id = get_or_generate_request_id(request.headers());
    let header_value = HeaderValue::from_str(&request_id)
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));

    request
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value.clone());

    let method = request.method().clone();
    let uri = request.uri().clone();
    let span = tracing::info_span!("request", request_id = %request_id, method = %method, uri = %uri);

    let mut response = next.run(request).instrument(span).await;

    let duration_ms = start_time.elapsed().as_millis();
    let status = response.status();
    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

    if status.is_server_error() {
        warn!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request failed");
    } else if status.is_client_error() {
        info!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request rejected");
    } else {
        info!(request_id = %request_id, method = %method, uri = %uri, status = %status, duration_ms = %duration_ms, "Request completed");
    }

    // 性能监控：记录慢请求
    if start_time.elapsed() > SLOW_REQUEST_THRESHOLD {
        warn!(request_id = %request_id, method = %method, uri = %uri, duration_ms = %duration_ms, "Slow request detected");
    }

    response
}

/// 获取或生成请求ID
fn get_or_generate_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_request_id_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(get_or_generate_request_id(&headers), "abc-123");
    }

    #[test]
    fn test_missing_or_oversized_request_id_is_replaced() {
        let generated = get_or_generate_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&generated).is_ok());

        let mut headers = HeaderMap::new();
        let long = "x".repeat(200);
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&long).unwrap());
        assert_ne!(get_or_generate_request_id(&headers), long);
    }
}
