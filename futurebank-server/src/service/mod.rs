//! Service Module
//!
//! Business logic layer of the server.
//! Services orchestrate between the auth provider and repositories and hold
//! the dashboard's rules.

pub mod auth;
pub mod dashboard;
pub mod kudos;
pub mod listing;
pub mod profile;

// Re-export for convenience
pub use auth as auth_service;
pub use dashboard as dashboard_service;
pub use kudos as kudos_service;
pub use listing as listing_service;
pub use profile as profile_service;
