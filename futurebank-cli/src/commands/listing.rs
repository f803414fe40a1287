//! Offer and want command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use futurebank_core::domain::listing::{DEFAULT_CATEGORY, Offer, Want, WantCriterion};
use futurebank_core::dto::listing::{CreateOffer, CreateWant};

use crate::config::Config;
use crate::state::CliState;

const UNTITLED: &str = "(untitled)";

/// Offer subcommands
#[derive(Subcommand)]
pub enum OfferCommands {
    /// Offer a skill
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Defaults to "Misc"
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List your offers
    List,
}

/// Want subcommands
#[derive(Subcommand)]
pub enum WantCommands {
    /// Ask for help
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Defaults to "Misc"
        #[arg(short, long)]
        category: Option<String>,

        /// Comma-separated: in_person, remote, flexible_schedule,
        /// beginner_friendly, materials_provided, urgent
        #[arg(long, value_delimiter = ',')]
        criteria: Vec<WantCriterion>,
    },
    /// List your wants
    List,
}

pub async fn handle_offer_command(command: OfferCommands, config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;
    state.require_session()?;
    let client = state.client(config);

    match command {
        OfferCommands::Add {
            title,
            description,
            category,
        } => {
            let offer = client
                .create_offer(&CreateOffer {
                    title,
                    description,
                    category,
                })
                .await?;

            println!("{}", "✓ Offer posted!".green().bold());
            print_offer(&offer);

            state.dashboard.offers.insert(0, offer);
        }
        OfferCommands::List => {
            let offers = client.list_offers().await?;

            if offers.is_empty() {
                println!("{}", "You have no offers yet.".yellow());
            } else {
                println!("{}", format!("Your offers ({}):", offers.len()).bold());
                println!();
                for offer in &offers {
                    print_offer(offer);
                }
            }

            state.dashboard.offers = offers;
        }
    }

    state.save(&config.state_file)
}

pub async fn handle_want_command(command: WantCommands, config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;
    state.require_session()?;
    let client = state.client(config);

    match command {
        WantCommands::Add {
            title,
            description,
            category,
            criteria,
        } => {
            let want = client
                .create_want(&CreateWant {
                    title,
                    description,
                    category,
                    criteria,
                })
                .await?;

            println!("{}", "✓ Want posted!".green().bold());
            print_want(&want);

            state.dashboard.wants.insert(0, want);
        }
        WantCommands::List => {
            let wants = client.list_wants().await?;

            if wants.is_empty() {
                println!("{}", "You have no wants yet.".yellow());
            } else {
                println!("{}", format!("Your wants ({}):", wants.len()).bold());
                println!();
                for want in &wants {
                    print_want(want);
                }
            }

            state.dashboard.wants = wants;
        }
    }

    state.save(&config.state_file)
}

pub(crate) fn print_offer(offer: &Offer) {
    let category = offer.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    println!(
        "  {} {} {}",
        "▸".cyan(),
        offer.title.as_deref().unwrap_or(UNTITLED).bold(),
        format!("[{}]", category).dimmed()
    );
    if let Some(desc) = &offer.description {
        println!("    {}", desc.dimmed());
    }
}

pub(crate) fn print_want(want: &Want) {
    let category = want.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    println!(
        "  {} {} {}",
        "▸".magenta(),
        want.title.as_deref().unwrap_or(UNTITLED).bold(),
        format!("[{}]", category).dimmed()
    );
    if let Some(desc) = &want.description {
        println!("    {}", desc.dimmed());
    }
    if !want.criteria.is_empty() {
        let labels: Vec<&str> = want.criteria.iter().map(|c| c.label()).collect();
        println!("    {}", labels.join(" · ").yellow());
    }
}
