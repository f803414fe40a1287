//! Offer and Want API Handlers
//!
//! Every route acts on the caller's own listings.

use axum::{Json, extract::State, http::HeaderMap};
use futurebank_core::domain::listing::{Offer, Want};
use futurebank_core::dto::listing::{CreateOffer, CreateWant};

use crate::api::auth::authenticate;
use crate::api::error::ApiResult;
use crate::service::listing_service;
use crate::state::AppState;

/// GET /api/offers
pub async fn list_offers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Offer>>> {
    let caller = authenticate(&state, &headers).await?;

    let offers =
        listing_service::list_offers(state.store.as_ref(), Some(&caller.token), caller.user.id)
            .await?;

    Ok(Json(offers))
}

/// POST /api/offers
pub async fn create_offer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateOffer>,
) -> ApiResult<Json<Offer>> {
    let caller = authenticate(&state, &headers).await?;

    let offer = listing_service::create_offer(
        state.store.as_ref(),
        Some(&caller.token),
        &caller.user,
        req,
    )
    .await?;

    Ok(Json(offer))
}

/// GET /api/wants
pub async fn list_wants(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Want>>> {
    let caller = authenticate(&state, &headers).await?;

    let wants =
        listing_service::list_wants(state.store.as_ref(), Some(&caller.token), caller.user.id)
            .await?;

    Ok(Json(wants))
}

/// POST /api/wants
pub async fn create_want(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateWant>,
) -> ApiResult<Json<Want>> {
    let caller = authenticate(&state, &headers).await?;

    let want = listing_service::create_want(
        state.store.as_ref(),
        Some(&caller.token),
        &caller.user,
        req,
    )
    .await?;

    Ok(Json(want))
}
