//! Kudos command handler

use anyhow::Result;
use clap::Args;
use colored::*;
use futurebank_core::domain::community::KUDOS_OPTIONS;
use futurebank_core::dto::kudos::{CompletedExchange, KudosRequest};
use futurebank_core::dto::listing::CreateOffer;
use futurebank_core::kudos::PAY_IT_FORWARD_CATEGORY;

use crate::config::Config;
use crate::state::CliState;

#[derive(Args)]
pub struct KudosArgs {
    /// Title of the completed exchange
    #[arg(short, long)]
    title: String,

    /// Category of the completed exchange
    #[arg(short, long)]
    category: Option<String>,

    /// One of: Great Teacher, Patient Listener, Creative Problem-Solver,
    /// Reliable & Punctual, Generous Spirit
    #[arg(short, long)]
    kudos: String,

    /// Post the suggested pay-it-forward offer right away
    #[arg(long)]
    pay_it_forward: bool,
}

pub async fn give_kudos(args: KudosArgs, config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;
    state.require_session()?;
    let client = state.client(config);

    let receipt = client
        .give_kudos(&KudosRequest {
            exchange: CompletedExchange {
                title: args.title,
                category: args.category,
            },
            kudos: args.kudos,
        })
        .await
        .map_err(|e| {
            if e.is_client_error() && !e.is_unauthorized() {
                anyhow::anyhow!("{} (choose from: {})", e, KUDOS_OPTIONS.join(", "))
            } else {
                e.into()
            }
        })?;

    println!(
        "{}",
        format!("✓ Kudos given: {}", receipt.kudos).green().bold()
    );

    let Some(draft) = receipt.pay_it_forward else {
        return Ok(());
    };

    println!();
    println!("{}", "Pay it forward?".bold());
    println!("  {}", draft.title.cyan());
    println!("  {}", draft.description.dimmed());

    if !args.pay_it_forward {
        println!(
            "  {}",
            "Re-run with --pay-it-forward to post this offer.".dimmed()
        );
        return Ok(());
    }

    let offer = client
        .create_offer(&CreateOffer {
            title: draft.title,
            description: Some(draft.description),
            category: Some(PAY_IT_FORWARD_CATEGORY.to_string()),
        })
        .await?;

    println!("{}", "✓ Offer posted!".green().bold());
    state.dashboard.offers.insert(0, offer);
    state.save(&config.state_file)
}
