//! Dashboard API Handler

use axum::{Json, extract::State, http::HeaderMap};
use futurebank_core::dashboard::DashboardView;

use crate::api::auth::optional_caller;
use crate::api::error::ApiResult;
use crate::service::dashboard_service;
use crate::state::AppState;

/// GET /api/dashboard
/// Community sections for everyone, personal sections for a signed-in caller
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardView>> {
    let caller = optional_caller(&state, &headers).await?;

    let view = dashboard_service::build_dashboard(
        state.store.as_ref(),
        state.features,
        &state.community,
        caller.as_ref().map(|c| (c.token.as_str(), &c.user)),
    )
    .await;

    Ok(Json(view))
}
