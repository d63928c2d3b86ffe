use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod advisor;
mod catalog;
mod cli;
mod config;
mod engine;
mod error;
mod output;
mod recommend;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("rechargeace=debug")
    } else {
        EnvFilter::new("rechargeace=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Recommend(args) => cli::recommend::execute(args).await,
        Commands::Plans(args) => cli::plans::execute(args),
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
