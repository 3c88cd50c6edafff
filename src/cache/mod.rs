//! Redis cache for dashboard summaries. Every operation soft-fails: a
//! missing or broken Redis only costs a recomputation.
//!
//! Each resource has a generation counter. Summaries are stored under the
//! generation that was current when the read started, and a write bumps the
//! counter, so a summary computed before the write lands under a key no
//! reader will look at again.

use ::redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

const KEY_PREFIX: &str = "hr:summary";
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

pub fn generation_key(resource: &str) -> String {
    format!("{}:{}:generation", KEY_PREFIX, resource)
}

pub fn summary_key(resource: &str, generation: Generation) -> String {
    format!("{}:{}:{}", KEY_PREFIX, resource, generation.0)
}

/// Result of a cache read. A miss carries the generation to store the
/// recomputed summary under, or `None` when Redis is unusable.
pub enum Lookup<T> {
    Hit(T),
    Miss(Option<Generation>),
}

#[derive(Clone)]
pub struct SummaryCache {
    client: Client,
    ttl: u64,
}

impl SummaryCache {
    pub fn new(client: Client, ttl: u64) -> Self {
        Self { client, ttl }
    }

    /// 缓存是否启用（TTL 为 0 时关闭）
    pub fn enabled(&self) -> bool {
        self.ttl > 0
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match tokio::time::timeout(CONNECT_TIMEOUT, self.client.get_multiplexed_async_connection()).await {
            Ok(Ok(conn)) => Some(conn),
            Ok(Err(e)) => {
                tracing::warn!("Redis unavailable, skipping summary cache: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!("Redis connection timed out, skipping summary cache");
                None
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, resource: &str) -> Lookup<T> {
        if !self.enabled() {
            return Lookup::Miss(None);
        }
        let Some(mut conn) = self.connection().await else {
            return Lookup::Miss(None);
        };

        let counter = generation_key(resource);
        let generation = match conn.get::<_, Option<u64>>(&counter).await {
            Ok(value) => Generation(value.unwrap_or(0)),
            Err(e) => {
                tracing::warn!(key = %counter, "Failed to read summary generation: {}", e);
                return Lookup::Miss(None);
            }
        };

        let key = summary_key(resource, generation);
        let cached: Option<String> = match conn.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, "Failed to read cached summary: {}", e);
                return Lookup::Miss(None);
            }
        };
        let Some(cached) = cached else {
            return Lookup::Miss(Some(generation));
        };

        match serde_json::from_str(&cached) {
            Ok(value) => {
                tracing::debug!(key = %key, "Summary cache hit");
                Lookup::Hit(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, "Discarding undecodable cached summary: {}", e);
                Lookup::Miss(Some(generation))
            }
        }
    }

    /// Stores a summary under the generation returned by the `get` that missed.
    pub async fn put<T: Serialize>(&self, resource: &str, generation: Generation, value: &T) {
        if !self.enabled() {
            return;
        }
        let key = summary_key(resource, generation);
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %key, "Failed to serialize summary for cache: {}", e);
                return;
            }
        };
        let Some(mut conn) = self.connection().await else {
            return;
        };
        if let Err(e) = conn.set_ex::<_, _, ()>(&key, json, self.ttl).await {
            tracing::warn!(key = %key, "Failed to cache summary: {}", e);
        }
    }

    /// Called after every write to the resource. Older generations expire on
    /// their own TTL.
    pub async fn invalidate(&self, resource: &str) {
        if !self.enabled() {
            return;
        }
        let counter = generation_key(resource);
        let Some(mut conn) = self.connection().await else {
            return;
        };
        if let Err(e) = conn.incr::<_, _, u64>(&counter, 1).await {
            tracing::warn!(key = %counter, "Failed to invalidate cached summary: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keys() {
        assert_eq!(summary_key("payroll", Generation(0)), "hr:summary:payroll:0");
        assert_eq!(
            summary_key("hr-operations", Generation(7)),
            "hr:summary:hr-operations:7"
        );
        assert_eq!(generation_key("payroll"), "hr:summary:payroll:generation");
    }

    #[test]
    fn test_write_moves_readers_to_a_new_key() {
        // 写入前算出的摘要落在旧代的键上
        let before = summary_key("applications", Generation(4));
        let after = summary_key("applications", Generation(5));
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_disabled_cache_never_connects() {
        let client = Client::open("redis://127.0.0.1:1/").unwrap();
        let cache = SummaryCache::new(client, 0);
        assert!(!cache.enabled());
        assert!(matches!(
            cache.get::<Vec<i32>>("hiring").await,
            Lookup::Miss(None)
        ));
        cache.put("hiring", Generation(0), &vec![1, 2, 3]).await;
        cache.invalidate("hiring").await;
    }

    #[tokio::test]
    async fn test_unreachable_redis_degrades_to_miss() {
        let client = Client::open("redis://127.0.0.1:1/").unwrap();
        let cache = SummaryCache::new(client, 60);
        cache.put("leavers", Generation(0), &vec![1]).await;
        cache.invalidate("leavers").await;
        assert!(matches!(
            cache.get::<Vec<i32>>("leavers").await,
            Lookup::Miss(None)
        ));
    }
}
