//! Auth command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use futurebank_core::domain::auth::AuthEvent;
use futurebank_core::dto::auth::{SignInRequest, SignUpRequest};

use crate::config::Config;
use crate::state::CliState;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        email: String,

        /// Display name: 3-20 letters, numbers or underscores
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "FUTUREBANK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in with e-mail and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "FUTUREBANK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the cached dashboard
    Logout,
    /// Show who is signed in
    Status,
    /// Send the confirmation e-mail again
    Resend {
        /// Defaults to the signed-in account's address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Print the URL that signs in with an OAuth provider
    Oauth {
        /// Provider name, e.g. github or google
        provider: String,

        #[arg(long)]
        redirect_to: Option<String>,
    },
}

pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;

    match command {
        AuthCommands::Signup {
            email,
            username,
            password,
        } => signup(&mut state, config, email, username, password).await,
        AuthCommands::Login { email, password } => login(&mut state, config, email, password).await,
        AuthCommands::Logout => logout(&mut state, config).await,
        AuthCommands::Status => status(&mut state, config).await,
        AuthCommands::Resend { email } => resend(&state, config, email).await,
        AuthCommands::Oauth {
            provider,
            redirect_to,
        } => oauth(&state, config, &provider, redirect_to.as_deref()).await,
    }
}

async fn signup(
    state: &mut CliState,
    config: &Config,
    email: String,
    username: String,
    password: String,
) -> Result<()> {
    let client = state.client(config);

    let outcome = client
        .sign_up(&SignUpRequest {
            email,
            password,
            username,
        })
        .await?;

    println!("{}", "✓ Account created!".green().bold());
    if let Some(message) = &outcome.message {
        println!("  {}", message.yellow());
    }

    match outcome.session {
        Some(session) => {
            state.apply(AuthEvent::SignedIn(session));
            state.save(&config.state_file)?;
            println!("  Signed in as {}", outcome.user.id.to_string().cyan());
        }
        None => {
            println!(
                "  {}",
                "Check your e-mail to confirm your account, then run `futurebank auth login`."
                    .dimmed()
            );
        }
    }

    Ok(())
}

async fn login(
    state: &mut CliState,
    config: &Config,
    email: String,
    password: String,
) -> Result<()> {
    let session = state
        .client(config)
        .sign_in(&SignInRequest { email, password })
        .await?;

    let email = session.user.email.clone().unwrap_or_default();
    state.apply(AuthEvent::SignedIn(session));
    state.save(&config.state_file)?;

    println!("{}", format!("✓ Signed in as {}", email).green().bold());

    Ok(())
}

async fn logout(state: &mut CliState, config: &Config) -> Result<()> {
    if state.session.is_none() {
        println!("{}", "Not signed in.".yellow());
        return Ok(());
    }

    // The local session is dropped even if the server already forgot it.
    if let Err(err) = state.client(config).sign_out().await {
        eprintln!("{} {}", "warning:".yellow().bold(), err);
    }

    state.apply(AuthEvent::SignedOut);
    state.save(&config.state_file)?;

    println!("{}", "✓ Signed out".green().bold());

    Ok(())
}

async fn status(state: &mut CliState, config: &Config) -> Result<()> {
    let Some(session) = state.session.clone() else {
        println!("{}", "Not signed in.".yellow());
        return Ok(());
    };

    let user = match state.client(config).session_user().await {
        Ok(user) => user,
        Err(err) if err.is_unauthorized() => {
            // Expired access token: try the refresh token once
            match state.client(config).refresh(&session.refresh_token).await {
                Ok(refreshed) => {
                    let user = refreshed.user.clone();
                    state.apply(AuthEvent::TokenRefreshed(refreshed));
                    state.save(&config.state_file)?;
                    user
                }
                Err(_) => {
                    state.apply(AuthEvent::SignedOut);
                    state.save(&config.state_file)?;
                    println!("{}", "Session expired. Please sign in again.".yellow());
                    return Ok(());
                }
            }
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", "Session:".bold());
    println!("  User:      {}", user.id.to_string().cyan());
    if let Some(email) = &user.email {
        println!("  E-mail:    {}", email);
    }
    if user.is_confirmed() {
        println!("  Confirmed: {}", "yes".green());
    } else {
        println!("  Confirmed: {}", "no".red());
    }
    if let Some(balance) = state.dashboard.balance() {
        println!("  Balance:   {} credits", format!("{:.1}", balance).bold());
    }

    Ok(())
}

async fn resend(state: &CliState, config: &Config, email: Option<String>) -> Result<()> {
    let email = email
        .or_else(|| state.session.as_ref().and_then(|s| s.user.email.clone()))
        .ok_or_else(|| anyhow::anyhow!("No e-mail address given and not signed in"))?;

    state.client(config).resend_confirmation(&email).await?;

    let message = format!("✓ Confirmation e-mail sent to {}", email);
    println!("{}", message.green().bold());

    Ok(())
}

async fn oauth(
    state: &CliState,
    config: &Config,
    provider: &str,
    redirect_to: Option<&str>,
) -> Result<()> {
    let redirect = state.client(config).oauth_url(provider, redirect_to).await?;

    println!("Open this URL in your browser to continue:");
    println!("  {}", redirect.url.cyan());

    Ok(())
}
