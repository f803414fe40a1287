//! Dashboard command handler

use anyhow::Result;
use colored::*;
use futurebank_core::dashboard::{DashboardView, PersonalDashboard, Section};
use futurebank_core::domain::auth::AuthEvent;

use crate::commands::listing::{print_offer, print_want};
use crate::config::Config;
use crate::state::CliState;

const BAR_WIDTH: usize = 20;

/// Fetch and render the dashboard
///
/// A token rejected by the server ends the local session, which clears the
/// cached balance and listings.
pub async fn show_dashboard(config: &Config) -> Result<()> {
    let mut state = CliState::load(&config.state_file)?;

    let view = match state.client(config).dashboard().await {
        Ok(view) => view,
        Err(err) if err.is_unauthorized() && state.session.is_some() => {
            state.apply(AuthEvent::SignedOut);
            state.save(&config.state_file)?;
            anyhow::bail!("Session expired. Run `futurebank auth login` to sign in again.");
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(personal) = &view.personal {
        state.dashboard.load(personal);
        state.save(&config.state_file)?;
    }

    render(&view);

    Ok(())
}

fn render(view: &DashboardView) {
    let name = view
        .personal
        .as_ref()
        .and_then(|p| p.profile.as_ref())
        .map(|p| p.display_name().to_string());

    match (&name, view.show_welcome) {
        (Some(name), true) => println!("{}", format!("Welcome back, {}!", name).bold()),
        (None, true) => println!("{}", "Welcome to FutureBank!".bold()),
        _ => {}
    }

    if view.email_confirmation_required {
        println!(
            "{}",
            "Please confirm your e-mail address. Run `futurebank auth resend` to get a new link."
                .yellow()
        );
    }

    if let Some(balance) = view
        .personal
        .as_ref()
        .and_then(|p| p.profile.as_ref())
        .map(|p| p.time_balance)
    {
        let balance = format!("{:.1}", balance);
        println!("Balance: {} credits", balance.green().bold());
    }

    for section in &view.sections {
        println!();
        match section {
            Section::CommunityPulse => render_pulse(view),
            Section::GroupProjects => render_projects(view),
            Section::CommunityFund => render_fund(view),
            Section::MyOffers => {
                if let Some(personal) = &view.personal {
                    render_offers(personal);
                }
            }
            Section::MyWants => {
                if let Some(personal) = &view.personal {
                    render_wants(personal);
                }
            }
            Section::ContributionConstellation => {
                if let Some(personal) = &view.personal {
                    render_constellation(personal);
                }
            }
            Section::Marketplace => {
                println!("{}", "Marketplace".bold());
                if view.personal.is_some() {
                    println!("  Post with `futurebank offer add` or `futurebank want add`.");
                } else {
                    println!("  Sign in with `futurebank auth login` to post offers and wants.");
                }
            }
        }
    }
}

fn render_pulse(view: &DashboardView) {
    let Some(pulse) = &view.pulse else { return };

    println!("{}", "Community Pulse".bold());
    let rows = [
        ("Exchanges this week", pulse.exchanges_this_week),
        ("New members", pulse.new_members),
        ("Active projects", pulse.active_projects),
    ];
    for (label, value) in rows {
        let label = format!("{}:", label);
        println!("  {:<20} {}", label, value.to_string().cyan());
    }
}

fn render_projects(view: &DashboardView) {
    let Some(projects) = &view.projects else { return };

    println!("{}", "Group Projects".bold());
    if projects.is_empty() {
        println!("  {}", "No projects yet.".dimmed());
    }
    for project in projects {
        let filled = (project.progress() * BAR_WIDTH as f64).round() as usize;
        println!("  {} {}", "▸".cyan(), project.title.bold());
        println!(
            "    [{}{}] {:.0}/{:.0} credits",
            "█".repeat(filled).green(),
            "░".repeat(BAR_WIDTH - filled).dimmed(),
            project.current,
            project.goal
        );
        if !project.participants.is_empty() {
            println!("    {}", project.participants.join(", ").dimmed());
        }
    }
}

fn render_fund(view: &DashboardView) {
    let Some(fund) = &view.fund else { return };

    println!("{}", "Community Fund".bold());
    let balance = format!("{:.1}", fund.balance);
    println!("  Balance: {} credits", balance.green());
}

fn render_offers(personal: &PersonalDashboard) {
    let heading = format!("My Offers ({})", personal.offers.len());
    println!("{}", heading.bold());
    if personal.offers.is_empty() {
        println!("  {}", "Nothing offered yet.".dimmed());
    }
    for offer in &personal.offers {
        print_offer(offer);
    }
}

fn render_wants(personal: &PersonalDashboard) {
    println!("{}", format!("My Wants ({})", personal.wants.len()).bold());
    if personal.wants.is_empty() {
        println!("  {}", "Nothing requested yet.".dimmed());
    }
    for want in &personal.wants {
        print_want(want);
    }
}

fn render_constellation(personal: &PersonalDashboard) {
    println!("{}", "Contribution Constellation".bold());
    if personal.contributions.is_empty() {
        println!("  {}", "Your first offer lights the first star.".dimmed());
    }
    for slice in &personal.contributions {
        println!(
            "  {:<16} {}",
            slice.category,
            "★".repeat(slice.count as usize).yellow()
        );
    }
}
