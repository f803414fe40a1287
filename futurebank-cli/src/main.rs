//! FutureBank CLI
//!
//! Command-line dashboard for the FutureBank time bank.

mod commands;
mod config;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "futurebank")]
#[command(about = "FutureBank community time bank", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "FUTUREBANK_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// Where the session and cached dashboard are kept
    /// (default: ~/.futurebank/state.json)
    #[arg(long, env = "FUTUREBANK_STATE_FILE")]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new(cli.server_url, cli.state_file)?;

    handle_command(cli.command, &config).await
}
