//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod dashboard;
mod kudos;
mod listing;
mod profile;

pub use auth::AuthCommands;
pub use listing::{OfferCommands, WantCommands};
pub use profile::ProfileCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sign up, sign in and manage the session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Skills you offer
    Offer {
        #[command(subcommand)]
        command: OfferCommands,
    },
    /// Help you are looking for
    Want {
        #[command(subcommand)]
        command: WantCommands,
    },
    /// Show the community dashboard
    Dashboard,
    /// Give kudos for a completed exchange
    Kudos(kudos::KudosArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::Profile { command } => profile::handle_profile_command(command, config).await,
        Commands::Offer { command } => listing::handle_offer_command(command, config).await,
        Commands::Want { command } => listing::handle_want_command(command, config).await,
        Commands::Dashboard => dashboard::show_dashboard(config).await,
        Commands::Kudos(args) => kudos::give_kudos(args, config).await,
    }
}
