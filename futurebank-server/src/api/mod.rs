//! API Module
//!
//! HTTP API layer of the dashboard server.
//! Each submodule handles endpoints for a specific area.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod kudos;
pub mod listing;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth endpoints
        .route(
            "/api/auth/resend-confirmation",
            post(auth::resend_confirmation),
        )
        .route("/api/auth/signup", post(auth::sign_up))
        .route("/api/auth/signin", post(auth::sign_in))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/signout", post(auth::sign_out))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/oauth/{provider}", get(auth::oauth))
        // Profile endpoints
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        // Listing endpoints
        .route(
            "/api/offers",
            get(listing::list_offers).post(listing::create_offer),
        )
        .route(
            "/api/wants",
            get(listing::list_wants).post(listing::create_want),
        )
        // Dashboard endpoints
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/kudos", post(kudos::give_kudos))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
