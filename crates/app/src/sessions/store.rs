//! Key-value store

use async_trait::async_trait;
use mockall::automock;

use crate::sessions::errors::CacheError;

/// Minimal expiring key-value collaborator behind [`super::ExpiringStore`].
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Set `key` to `value`, expiring after `ttl_seconds`. Overwrites unconditionally.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Read the value at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Reset the time-to-live of `key`.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Delete `key`, whether or not it exists.
    async fn del(&self, key: &str) -> Result<(), CacheError>;

    /// List keys matching a glob `pattern`.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;
}
