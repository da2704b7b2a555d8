//! Flipp bidder CLI.
//!
//! This tool provides commands for:
//! - Printing the outbound campaign requests built from an OpenRTB bid request
//! - Mapping a saved campaign service response to bids
//! - Sending a bid request through the full pipeline
//! - Validating configuration files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod bidding;
mod config;
mod error;
mod logging;
mod transport;

use error::CliError;

#[derive(Parser)]
#[command(name = "fbcli")]
#[command(about = "Flipp bidder CLI for inspecting and forwarding bid traffic")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the TOML configuration file (defaults to the built-in settings)
    #[arg(long, short, global = true, env = "FLIPP_BIDDER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outbound requests built from a bid request
    Requests {
        /// Path to the OpenRTB bid request JSON
        #[arg(long, short)]
        request: PathBuf,
    },

    /// Map a saved campaign service response to bids
    Bids {
        /// Path to the OpenRTB bid request JSON
        #[arg(long, short)]
        request: PathBuf,

        /// HTTP status the campaign service answered with
        #[arg(long, short, default_value_t = 200)]
        status: u16,

        /// Path to the saved response body
        #[arg(long, short)]
        body: Option<PathBuf>,
    },

    /// Translate, forward and map a bid request against the configured endpoint
    Send {
        /// Path to the OpenRTB bid request JSON
        #[arg(long, short)]
        request: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate config against settings validation
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let load_settings = || config::load_settings(cli.config.as_deref());

    match cli.command {
        Commands::Requests { request } => bidding::requests(&load_settings()?, request),
        Commands::Bids {
            request,
            status,
            body,
        } => bidding::bids(&load_settings()?, request, status, body),
        Commands::Send { request } => bidding::send(&load_settings()?, request),
        Commands::Config { action } => match action {
            ConfigAction::Validate { file } => config::validate(file, cli.verbose),
        },
    }
}
