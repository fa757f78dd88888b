//! Expiring Store

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    marker::PhantomData,
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::sessions::{errors::CacheError, store::KeyValueStore};

/// JSON values of type `T` stored under `prefix + id`, each living for `ttl_seconds`.
///
/// Reads slide the expiry: a hit resets the key's time-to-live to the full TTL.
pub struct ExpiringStore<T> {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
    ttl_seconds: u64,
    _value: PhantomData<fn() -> T>,
}

impl<T> ExpiringStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl_seconds,
            _value: PhantomData,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, id: &str) -> String {
        format!("{}{id}", self.prefix)
    }

    /// Write `value`, replacing anything already stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialised or the store is unreachable.
    pub async fn create(&self, id: &str, value: &T) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;

        self.store
            .set(&self.key(id), payload, self.ttl_seconds)
            .await
    }

    /// Read the value for `id`, extending its lifetime on a hit.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the stored value does not decode.
    pub async fn get(&self, id: &str) -> Result<Option<T>, CacheError> {
        let key = self.key(id);

        let Some(payload) = self.store.get(&key).await? else {
            debug!(key, "expiring store miss");
            return Ok(None);
        };

        self.store.expire(&key, self.ttl_seconds).await?;

        Ok(Some(serde_json::from_str(&payload)?))
    }

    /// Shallow-merge the top-level fields of `partial` over the stored value.
    ///
    /// Returns `false` without writing anything when there is no value for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `partial` is not a JSON object, the merged value no longer decodes as
    /// `T`, or the store is unreachable.
    pub async fn update<P: Serialize + Sync>(&self, id: &str, partial: &P) -> Result<bool, CacheError> {
        let Value::Object(changes) = serde_json::to_value(partial)? else {
            return Err(CacheError::NotAnObject);
        };

        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut merged = serde_json::to_value(&existing)?;

        if let Value::Object(fields) = &mut merged {
            fields.extend(changes);
        }

        let value: T = serde_json::from_value(merged)?;

        self.create(id, &value).await?;

        Ok(true)
    }

    /// Delete the value for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn destroy(&self, id: &str) -> Result<(), CacheError> {
        self.store.del(&self.key(id)).await
    }

    /// Delete every value under this store's prefix, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn clear(&self) -> Result<u64, CacheError> {
        let keys = self.store.keys(&format!("{}*", self.prefix)).await?;

        for key in &keys {
            self.store.del(key).await?;
        }

        Ok(keys.len() as u64)
    }
}

impl<T> Clone for ExpiringStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            prefix: self.prefix.clone(),
            ttl_seconds: self.ttl_seconds,
            _value: PhantomData,
        }
    }
}

impl<T> Debug for ExpiringStore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExpiringStore")
            .field("prefix", &self.prefix)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
