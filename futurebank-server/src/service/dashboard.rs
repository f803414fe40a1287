//! Dashboard Service
//!
//! Builds the dashboard for an anonymous visitor or a signed-in member.

use futurebank_core::dashboard::{DashboardView, PersonalDashboard, contribution_slices};
use futurebank_core::domain::auth::User;
use futurebank_core::domain::community::CommunityBoard;
use futurebank_core::features::FeatureFlags;

use crate::backend::DataStore;
use crate::repository::{offer_repository, profile_repository, want_repository};

/// Assemble the dashboard
///
/// Failures while loading the member's own data are logged and leave the
/// affected part empty; the rest of the dashboard still renders.
pub async fn build_dashboard(
    store: &dyn DataStore,
    flags: FeatureFlags,
    board: &CommunityBoard,
    caller: Option<(&str, &User)>,
) -> DashboardView {
    let personal = match caller {
        Some((token, user)) => Some(load_personal(store, token, user).await),
        None => None,
    };

    DashboardView::assemble(flags, board, personal)
}

async fn load_personal(store: &dyn DataStore, token: &str, user: &User) -> PersonalDashboard {
    let token = Some(token);

    let profile = profile_repository::find_by_id(store, token, user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching profile for {}: {}", user.id, e);
            None
        });

    let offers = offer_repository::list_by_user(store, token, user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching offers for {}: {}", user.id, e);
            Vec::new()
        });

    let wants = want_repository::list_by_user(store, token, user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching wants for {}: {}", user.id, e);
            Vec::new()
        });

    PersonalDashboard {
        user: user.clone(),
        profile,
        contributions: contribution_slices(&offers),
        offers,
        wants,
    }
}
