//! Cache errors.

use redis::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error")]
    Connection(#[from] RedisError),

    #[error("cache value could not be (de)serialised")]
    Serialization(#[from] serde_json::Error),

    #[error("partial update must be a JSON object")]
    NotAnObject,
}
