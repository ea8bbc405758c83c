use clap::Parser;
use log::error;
use std::process::ExitCode;
use std::sync::Arc;

use station_ballot::api::ApiClient;
use station_ballot::commands::{self, Command};
use station_ballot::config::ApiConfig;

#[derive(Debug, Parser)]
#[command(name = "station-ballot", about = "Vote in station elections from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let api = match ApiClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build API client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(why) = commands::handle_command(api, cli.command).await {
        error!("Command failed: {:?}", why);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
