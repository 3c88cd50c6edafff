use hr_portal::config::Config;
use hr_portal::db::enums::UserRole;
use hr_portal::db::models::AuthUser;
use hr_portal::middleware::JwtService;
use hr_portal::{AppState, build_app, db};
use reqwest::{StatusCode, multipart};
use serde_json::{Value, json};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use uuid::Uuid;

mod unit;

const TEST_JWT_SECRET: &str = "integration-secret";
const RUNNING_SERVER_URL: &str = "http://127.0.0.1:8000";

fn test_config() -> Config {
    Config {
        // 不存在的数据库：鉴权检查不应触达数据库
        database_url: "postgres://hr:hr@127.0.0.1:1/hr_portal_test".to_string(),
        database_max_connections: 2,
        database_min_connections: 0,
        database_connection_timeout: 1,
        redis_url: "redis://127.0.0.1:1/".to_string(),
        summary_cache_ttl: 60,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_access_token_expires_in: 3600,
        log_level: "warn".to_string(),
        log_format: "text".to_string(),
        uploads_dir: std::env::temp_dir()
            .join("hr-portal-it-uploads")
            .to_string_lossy()
            .into_owned(),
        max_upload_bytes: 1024 * 1024,
        bcrypt_cost: 4,
    }
}

/// Serves the full router on an ephemeral port and returns its base URL.
fn spawn_app() -> String {
    let config = test_config();
    let pool = db::create_lazy_pool(&config.database());
    let redis = redis::Client::open(config.redis_url.as_str()).unwrap();
    let state = Arc::new(AppState::new(pool, redis, config));

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(build_app(state).into_make_service());
    tokio::spawn(server);

    format!("http://{}", addr)
}

fn token_for(role: UserRole, secret: &str) -> String {
    let jwt = JwtService::new(&hr_portal::config::AuthConfig {
        jwt_secret: secret.to_string(),
        access_token_expires_in: 3600,
    });
    let user = AuthUser {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role),
        name: "Test Account".to_string(),
        role,
    };
    jwt.generate_access_token(&user).unwrap()
}

fn news_form(title: &str) -> multipart::Form {
    multipart::Form::new()
        .text("title", title.to_string())
        .text("summary", "Quarterly benefits update")
        .text("category", "announcement")
        .text("content", "Open enrolment starts next week.")
        .text("author", "People Team")
        .text("tags", "benefits, hr")
}

#[tokio::test]
async fn test_health_is_public() {
    let base = spawn_app();
    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let base = spawn_app();
    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let base = spawn_app();
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/auth/me", base)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 401);

    let response = client
        .post(format!("{}/jobs", base))
        .json(&json!({ "title": "Recruiter" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{}/news", base))
        .multipart(news_form("Unauthenticated"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    for path in [
        "/hiring/summary",
        "/leavers/summary",
        "/payroll/summary",
        "/training/summary",
        "/engagement/summary",
        "/demographics/summary",
        "/hr-operations/summary",
        "/metrics/summary",
    ] {
        let response = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", path);
    }
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let base = spawn_app();
    let forged = token_for(UserRole::SuperAdmin, "some-other-secret");

    let response = reqwest::Client::new()
        .get(format!("{}/users", base))
        .bearer_auth(forged)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_user_role_is_forbidden_on_admin_routes() {
    let base = spawn_app();
    let client = reqwest::Client::new();
    let token = token_for(UserRole::User, TEST_JWT_SECRET);

    let response = client
        .post(format!("{}/news", base))
        .bearer_auth(&token)
        .multipart(news_form("Forbidden"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    for path in ["/hiring", "/payroll", "/hr-operations", "/metrics"] {
        let response = client
            .post(format!("{}{}", base, path))
            .bearer_auth(&token)
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "POST {}", path);
    }

    let spreadsheet = multipart::Part::bytes(b"hire_date,department\n".to_vec())
        .file_name("hiring.csv")
        .mime_str("text/csv")
        .unwrap();
    let response = client
        .post(format!("{}/hiring/upload", base))
        .bearer_auth(&token)
        .multipart(multipart::Form::new().part("file", spreadsheet))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .delete(format!("{}/applications/{}", base, Uuid::new_v4()))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_manage_users() {
    let base = spawn_app();
    let token = token_for(UserRole::Admin, TEST_JWT_SECRET);

    let response = reqwest::Client::new()
        .patch(format!("{}/users/{}/role", base, Uuid::new_v4()))
        .bearer_auth(token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_body_is_rejected_before_database() {
    let base = spawn_app();
    let token = token_for(UserRole::Admin, TEST_JWT_SECRET);

    let response = reqwest::Client::new()
        .post(format!("{}/hiring", base))
        .bearer_auth(token)
        .json(&json!({ "month": "2025-01-01", "department": "", "hires": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_database_outage_is_an_internal_error() {
    let base = spawn_app();
    let response = reqwest::get(format!("{}/jobs", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Connection error");
}

// The tests below talk to a server started with `cargo run` against a real
// database. They mint tokens with the server's JWT_SECRET.

fn running_server_token(role: UserRole) -> String {
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| TEST_JWT_SECRET.to_string());
    token_for(role, &secret)
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_news_lifecycle() {
    let client = reqwest::Client::new();
    let token = running_server_token(UserRole::Admin);

    let response = client
        .post(format!("{}/news", RUNNING_SERVER_URL))
        .bearer_auth(&token)
        .multipart(news_form("Benefits enrolment").text("is_published", "false"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Benefits enrolment");
    assert_eq!(body["data"]["is_published"], false);
    let news_id = body["data"]["id"].as_str().unwrap().to_string();

    // 草稿对公众不可见
    let response = client
        .get(format!("{}/news/{}", RUNNING_SERVER_URL, news_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let toggle_url = format!("{}/news/{}/publish", RUNNING_SERVER_URL, news_id);
    let first: Value = client
        .patch(&toggle_url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["data"]["is_published"], true);
    assert!(first["data"]["published_at"].is_string());

    let second: Value = client
        .patch(&toggle_url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["data"]["is_published"], false);

    let response = client
        .delete(format!("{}/news/{}", RUNNING_SERVER_URL, news_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/news/{}", RUNNING_SERVER_URL, news_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_news_image_is_unlinked_on_delete() {
    let client = reqwest::Client::new();
    let token = running_server_token(UserRole::Admin);

    let image = multipart::Part::bytes(b"\x89PNG\r\n\x1a\n".to_vec())
        .file_name("cover.png")
        .mime_str("image/png")
        .unwrap();
    let body: Value = client
        .post(format!("{}/news", RUNNING_SERVER_URL))
        .bearer_auth(&token)
        .multipart(news_form("With image").part("image", image))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let news_id = body["data"]["id"].as_str().unwrap().to_string();
    let image_path = body["data"]["image_path"].as_str().unwrap().to_string();

    let image_url = format!("{}{}", RUNNING_SERVER_URL, image_path);
    assert_eq!(reqwest::get(&image_url).await.unwrap().status(), StatusCode::OK);

    client
        .delete(format!("{}/news/{}", RUNNING_SERVER_URL, news_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(reqwest::get(&image_url).await.unwrap().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_job_rename_refreshes_applications_summary() {
    let client = reqwest::Client::new();
    let token = running_server_token(UserRole::Admin);

    let body: Value = client
        .post(format!("{}/jobs", RUNNING_SERVER_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Payroll Analyst",
            "department": "Finance",
            "location": "Remote",
            "employment_type": "full_time",
            "description": "Runs the monthly payroll"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let job_id = body["data"]["id"].as_str().unwrap().to_string();

    let form = multipart::Form::new()
        .text("job_id", job_id.clone())
        .text("full_name", "Ada Candidate")
        .text("email", "ada@example.com");
    let response = client
        .post(format!("{}/applications", RUNNING_SERVER_URL))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let summary_url = format!("{}/applications/summary", RUNNING_SERVER_URL);
    let title_in_summary = |summary: &Value| {
        summary["data"]["by_job"]
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["job_id"] == job_id.as_str())
            .map(|entry| entry["job_title"].as_str().unwrap().to_string())
    };

    // 先把汇总写进缓存
    let summary: Value = client
        .get(&summary_url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(title_in_summary(&summary).as_deref(), Some("Payroll Analyst"));

    let response = client
        .patch(format!("{}/jobs/{}", RUNNING_SERVER_URL, job_id))
        .bearer_auth(&token)
        .json(&json!({ "title": "Senior Payroll Analyst" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summary: Value = client
        .get(&summary_url)
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        title_in_summary(&summary).as_deref(),
        Some("Senior Payroll Analyst")
    );

    client
        .delete(format!("{}/jobs/{}", RUNNING_SERVER_URL, job_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_spreadsheet_import_is_all_or_nothing() {
    let client = reqwest::Client::new();
    let token = running_server_token(UserRole::Admin);
    let department = format!("Import-{}", Uuid::new_v4());

    let csv = format!(
        "Month,Department,Offers Made,Hires\n2025-01-01,{0},3,2\n2025-02-01,{0},1,5\n",
        department
    );
    let file = multipart::Part::bytes(csv.into_bytes()).file_name("hiring.csv");
    let response = client
        .post(format!("{}/hiring/upload", RUNNING_SERVER_URL))
        .bearer_auth(&token)
        .multipart(multipart::Form::new().part("file", file))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("row 2"));

    let listed: Value = client
        .get(format!("{}/hiring", RUNNING_SERVER_URL))
        .query(&[("department", department.as_str())])
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_payroll_net_pay_is_derived() {
    let client = reqwest::Client::new();
    let token = running_server_token(UserRole::Admin);

    let response = client
        .post(format!("{}/payroll", RUNNING_SERVER_URL))
        .bearer_auth(&token)
        .json(&json!({
            "employee_code": "E-900",
            "employee_name": "Integration",
            "department": "QA",
            "pay_period": "2025-06-01",
            "base_salary": 3000.0,
            "allowances": 250.0,
            "deductions": 400.0,
            "net_pay": 1.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["net_pay"], 2850.0);

    let id = body["data"]["id"].as_str().unwrap();
    client
        .delete(format!("{}/payroll/{}", RUNNING_SERVER_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
}
