//! Auth Config

use clap::Args;

/// Shared-secret API key settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Value clients must send in the `X-API-Key` header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,
}
