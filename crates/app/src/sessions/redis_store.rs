//! Redis-backed key-value store

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

use crate::sessions::{errors::CacheError, store::KeyValueStore};

#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis and keep a reconnecting connection manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the first connection fails.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        info!("connected to redis");

        Ok(Self { manager })
    }
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();

        Ok(conn.get(key).await?)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        conn.expire::<_, ()>(key, seconds).await?;

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();

        conn.del::<_, ()>(key).await?;

        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.manager.clone();
        let mut iter = conn.scan_match::<_, String>(pattern).await?;

        let mut keys = Vec::new();

        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }

        Ok(keys)
    }
}
