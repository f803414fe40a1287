//! Authentication domain types
//!
//! Users and sessions are owned by the hosted auth service. These mirror the
//! parts of its responses the dashboard needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    #[serde(default)]
    pub email: Option<String>,

    /// Set once the user followed the confirmation link
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// A signed-in session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,

    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: i64,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Session change notification
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}
