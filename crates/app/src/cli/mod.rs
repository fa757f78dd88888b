use clap::{Parser, Subcommand};
use trolley_app::{config::StoreConfig, context::AppContext};

mod migrate;
mod reset;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "trolley-app", about = "Trolley CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Delete every cart and order and clear the session and cart cache keyspaces
    Reset,

    /// Reset, then create a demo cart bound to a fresh session
    Seed(seed::SeedArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let app = AppContext::from_config(&self.store)
            .await
            .map_err(|error| format!("failed to start: {error}"))?;

        let result = match self.command {
            Commands::Migrate => migrate::run(&app).await,
            Commands::Reset => reset::run(&app).await,
            Commands::Seed(args) => seed::run(&app, args).await,
        };

        app.close().await;

        result
    }
}
