//! Kudos API Handler

use axum::{Json, extract::State, http::HeaderMap};
use futurebank_core::dto::kudos::{KudosReceipt, KudosRequest};

use crate::api::auth::authenticate;
use crate::api::error::ApiResult;
use crate::service::kudos_service;
use crate::state::AppState;

/// POST /api/kudos
/// Acknowledge a completed exchange
pub async fn give_kudos(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<KudosRequest>,
) -> ApiResult<Json<KudosReceipt>> {
    let caller = authenticate(&state, &headers).await?;

    tracing::info!("Kudos from {}: {}", caller.user.id, req.kudos);

    let receipt = kudos_service::give_kudos(&state.features, req)?;

    Ok(Json(receipt))
}
