//! Sessions
//!
//! Expiring JSON values keyed under a prefix. The same machinery backs session bindings and
//! the cart cache.

pub mod errors;
pub mod expiring;
pub mod models;
mod redis_store;
pub mod store;

pub use errors::CacheError;
pub use expiring::ExpiringStore;
pub use models::{CartSession, CartSessionToken, CartSessionUpdate};
pub use redis_store::RedisStore;
pub use store::*;
