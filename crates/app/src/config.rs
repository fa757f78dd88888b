//! Store Config

use clap::Args;

/// Connection and keyspace settings shared by the server and the CLI.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Redis connection string
    #[arg(
        long,
        env = "REDIS_URL",
        hide_env_values = true,
        default_value = "redis://127.0.0.1:6379"
    )]
    pub redis_url: String,

    /// Prefix for session binding keys; also the prefix clients put in front of the raw session key
    #[arg(long, env = "SESSION_PREFIX", default_value = "cart_session:")]
    pub session_prefix: String,

    /// Session binding time-to-live in seconds
    #[arg(long, env = "SESSION_TTL_SECONDS", default_value_t = 3_600)]
    pub session_ttl_seconds: u64,

    /// Prefix for cart cache keys
    #[arg(long, env = "CART_CACHE_PREFIX", default_value = "cart_cache:")]
    pub cart_cache_prefix: String,

    /// Cart cache time-to-live in seconds
    #[arg(long, env = "CART_CACHE_TTL_SECONDS", default_value_t = 3_600)]
    pub cart_cache_ttl_seconds: u64,
}
