//! Auth API Handlers
//!
//! HTTP endpoints for accounts and sessions, plus the bearer-token helpers
//! the other handlers authenticate with.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
};
use futurebank_core::domain::auth::{Session, User};
use futurebank_core::dto::auth::{
    OAuthRedirect, RefreshRequest, ResendConfirmation, ResendResponse, SignInRequest,
    SignUpOutcome, SignUpRequest,
};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::service::auth_service::{self, AuthError};
use crate::state::AppState;

const RESEND_FAILED: &str = "Failed to resend confirmation email";

/// An authenticated request
#[derive(Debug, Clone)]
pub struct Caller {
    pub token: String,
    pub user: User,
}

/// The token of an `Authorization: Bearer ...` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolve the caller of a request that requires a session
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> ApiResult<Caller> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;
    resolve(state, token).await
}

/// Resolve the caller if the request carries a token
///
/// A token that is present but rejected is still an error.
pub async fn optional_caller(state: &AppState, headers: &HeaderMap) -> ApiResult<Option<Caller>> {
    match bearer_token(headers) {
        Some(token) => resolve(state, token).await.map(Some),
        None => Ok(None),
    }
}

async fn resolve(state: &AppState, token: &str) -> ApiResult<Caller> {
    let user = auth_service::current_user(state.auth.as_ref(), token)
        .await
        .map_err(|e| match e {
            AuthError::Backend(err) if err.is_unauthorized() => {
                ApiError::Unauthorized("Invalid or expired session".to_string())
            }
            other => other.into(),
        })?;

    Ok(Caller {
        token: token.to_string(),
        user,
    })
}

/// POST /api/auth/resend-confirmation
/// Send the confirmation e-mail again
///
/// The body is parsed by hand: an unreadable body is a server-side failure
/// (500), while a missing address or a refusal by the auth service is 400.
pub async fn resend_confirmation(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ResendResponse>> {
    let req: ResendConfirmation = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Resend confirmation error: {}", e);
        ApiError::InternalError(RESEND_FAILED.to_string())
    })?;

    auth_service::resend_confirmation(state.auth.as_ref(), &req)
        .await
        .map_err(|e| match e {
            AuthError::Validation(err) => ApiError::BadRequest(err.to_string()),
            AuthError::Backend(err) => ApiError::BadRequest(err.to_string()),
            other => {
                tracing::error!("Resend confirmation error: {:?}", other);
                ApiError::InternalError(RESEND_FAILED.to_string())
            }
        })?;

    Ok(Json(ResendResponse { success: true }))
}

/// POST /api/auth/signup
/// Register an account and its profile
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<Json<SignUpOutcome>> {
    tracing::info!("Signing up: {}", req.username);

    let outcome =
        auth_service::sign_up(state.auth.as_ref(), state.store.as_ref(), req).await?;

    Ok(Json(outcome))
}

/// POST /api/auth/signin
/// Password sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<Session>> {
    let session = auth_service::sign_in(state.auth.as_ref(), req).await?;
    Ok(Json(session))
}

/// POST /api/auth/refresh
/// Exchange a refresh token for a new session
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<Session>> {
    let session = auth_service::refresh(state.auth.as_ref(), req).await?;
    Ok(Json(session))
}

/// POST /api/auth/signout
/// End the caller's session
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let caller = authenticate(&state, &headers).await?;

    auth_service::sign_out(state.auth.as_ref(), &caller.token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/session
/// The signed-in user
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<User>> {
    let caller = authenticate(&state, &headers).await?;
    Ok(Json(caller.user))
}

#[derive(Debug, Deserialize)]
pub struct OAuthParams {
    pub redirect_to: Option<String>,
}

/// GET /api/auth/oauth/{provider}
/// Where to send the browser to sign in with `provider`
pub async fn oauth(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthParams>,
) -> ApiResult<Json<OAuthRedirect>> {
    tracing::debug!("OAuth sign-in with {}", provider);

    let redirect = auth_service::oauth_redirect(
        state.auth.as_ref(),
        &provider,
        params.redirect_to.as_deref(),
    )
    .await?;

    Ok(Json(redirect))
}
