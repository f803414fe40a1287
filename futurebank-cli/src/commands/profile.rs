//! Profile command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use futurebank_core::domain::profile::Profile;
use futurebank_core::dto::profile::UpdateProfile;

use crate::config::Config;
use crate::state::CliState;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile and balance
    Show,
    /// Change username or avatar
    Update {
        #[arg(short, long)]
        username: String,

        /// Image URL; pass an empty string to remove the avatar
        #[arg(short, long)]
        avatar_url: Option<String>,
    },
}

pub async fn handle_profile_command(command: ProfileCommands, config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;
    state.require_session()?;
    let client = state.client(config);

    let profile = match command {
        ProfileCommands::Show => client.get_profile().await?,
        ProfileCommands::Update {
            username,
            avatar_url,
        } => {
            let profile = client
                .update_profile(&UpdateProfile {
                    username,
                    avatar_url,
                })
                .await?;
            println!("{}", "✓ Profile updated!".green().bold());
            profile
        }
    };

    print_profile(&profile);

    state.dashboard.profile = Some(profile);
    state.save(&config.state_file)?;

    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("{}", "Profile:".bold());
    println!("  Username: {}", profile.display_name().bold());
    println!(
        "  Balance:  {} credits",
        format!("{:.1}", profile.time_balance).green()
    );
    if let Some(avatar) = &profile.avatar_url {
        println!("  Avatar:   {}", avatar.dimmed());
    }
}
