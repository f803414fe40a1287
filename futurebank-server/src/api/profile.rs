//! Profile API Handlers

use axum::{Json, extract::State, http::HeaderMap};
use futurebank_core::domain::profile::Profile;
use futurebank_core::dto::profile::UpdateProfile;

use crate::api::auth::authenticate;
use crate::api::error::ApiResult;
use crate::service::profile_service;
use crate::state::AppState;

/// GET /api/profile
/// The caller's profile, created on first access
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Profile>> {
    let caller = authenticate(&state, &headers).await?;

    let profile =
        profile_service::get_profile(state.store.as_ref(), Some(&caller.token), &caller.user)
            .await?;

    Ok(Json(profile))
}

/// PUT /api/profile
/// Change username and avatar
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfile>,
) -> ApiResult<Json<Profile>> {
    let caller = authenticate(&state, &headers).await?;

    let profile = profile_service::update_profile(
        state.store.as_ref(),
        Some(&caller.token),
        &caller.user,
        req,
    )
    .await?;

    Ok(Json(profile))
}
