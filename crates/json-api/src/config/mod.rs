//! Server configuration

use clap::Parser;

use trolley_app::config::StoreConfig;

use crate::config::{
    auth::AuthConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod observability;
pub(crate) mod server;

/// Trolley JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "trolley-json", about = "Trolley JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listener settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Log output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export and request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Postgres, Redis, session and cart cache settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// API key settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from `.env`, the environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env is fine
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_flags_with_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "trolley-json",
            "--database-url",
            "postgres://localhost/trolley",
            "--api-key",
            "secret",
            "--port",
            "9000",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(config.store.session_prefix, "cart_session:");
        assert_eq!(config.store.cart_cache_ttl_seconds, 3600);
        assert_eq!(config.auth.api_key, "secret");

        Ok(())
    }
}
