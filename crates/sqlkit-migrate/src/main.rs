//! sqlkit-migrate CLI
//!
//! Command-line tool for inspecting and running migrations.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sqlkit_migrate::cli::{self, Cli};
use sqlkit_migrate::registry::MigrationRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The standalone binary has no migrations of its own; applications
    // register theirs and call `cli::run` from their own main.
    let registry = MigrationRegistry::new();
    cli::run(cli, &registry).await
}
