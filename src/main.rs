use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::Level;

use mrap_relay::config::ConfigLoader;
use mrap_relay::relay;

#[derive(Parser)]
#[command(name = "mrap-relay", version, about = "Submits multi-region access point route updates to S3 Control")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    help_config: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Mode {
    /// Serve invocations from the AWS Lambda runtime
    #[default]
    Lambda,
    /// Serve POST /routes over HTTP
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    if cli.help_config {
        ConfigLoader::print_help();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ConfigLoader::from_file(path).await?,
        None => ConfigLoader::load()?,
    };
    ConfigLoader::validate(&config)?;

    let level = Level::from_str(&config.log_level)?;
    let mode = cli.mode.unwrap_or_default();

    match mode {
        // CloudWatch stamps each line itself
        Mode::Lambda => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_level(true)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .init(),
        Mode::Serve => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_level(true)
            .with_thread_names(true)
            .with_target(true)
            .init(),
    }

    let route_relay = Arc::new(relay::build(&config).await);

    match mode {
        Mode::Lambda => relay::run_lambda(route_relay).await,
        Mode::Serve => relay::run_server(&config, route_relay).await,
    }
}
