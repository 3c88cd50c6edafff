use axum::Server;
use hr_portal::{AppState, build_app, config::Config, db, init_tracing};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("hr_portal failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);

    // Initialize database
    let db = db::create_pool(&config.database())?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database pool ready"
    );

    // Redis 仅用于缓存，连接失败时降级
    let redis = redis::Client::open(config.redis_url.as_str())?;

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let addr: SocketAddr = config.server_address().parse()?;
    let state = Arc::new(AppState::new(db, redis, config));
    let app = build_app(state);

    tracing::info!("Server running at http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
