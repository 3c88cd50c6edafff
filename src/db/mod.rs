pub mod enums;
pub mod models;
pub mod repositories;

use crate::config::DatabaseConfig;
use crate::error::AppResult;
use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use std::time::Duration;

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

fn pool_builder(config: &DatabaseConfig) -> r2d2::Builder<DbConnectionManager<PgConnection>> {
    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
}

/// Builds the pool and waits for the initial connections.
pub fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(&config.url);
    Ok(pool_builder(config).build(manager)?)
}

/// Builds the pool without opening any connection up front.
pub fn create_lazy_pool(config: &DatabaseConfig) -> DbPool {
    let manager = DbConnectionManager::<PgConnection>::new(&config.url);
    pool_builder(config).build_unchecked(manager)
}
