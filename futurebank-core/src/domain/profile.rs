//! Profile domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::User;

/// Fallback display name when a user has no usable e-mail or username
pub const DEFAULT_USERNAME: &str = "User";

/// A member's public profile and time-credit balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Same identity key as the authenticated user
    pub id: Uuid,

    pub username: Option<String>,

    pub avatar_url: Option<String>,

    /// Time credits (TC) held by this member
    #[serde(default)]
    pub time_balance: f64,
}

impl Profile {
    /// Default record for a user that has no profile yet
    ///
    /// The username is the local part of the e-mail address, falling back to
    /// [`DEFAULT_USERNAME`] when there is none.
    pub fn default_for(user: &User) -> Self {
        Self::with_username(user.id, derive_username(user.email.as_deref()))
    }

    /// New profile with an explicit username, no avatar and a zero balance
    pub fn with_username(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: Some(username.into()),
            avatar_url: None,
            time_balance: 0.0,
        }
    }

    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_USERNAME)
    }
}

/// Derive a display name from an e-mail address
pub fn derive_username(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .filter(|local| !local.is_empty())
        .unwrap_or(DEFAULT_USERNAME)
        .to_string()
}
