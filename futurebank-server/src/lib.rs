//! FutureBank server
//!
//! HTTP service behind the community dashboard. Accounts, sessions and rows
//! live in the hosted backend; this crate validates input, keeps profiles in
//! step with accounts and assembles the dashboard.

pub mod api;
pub mod backend;
pub mod config;
pub mod repository;
pub mod service;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;
