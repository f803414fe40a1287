//! Profile DTOs

use serde::{Deserialize, Serialize};

/// Profile settings form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub username: String,
    /// Image URL or data URL; empty clears the avatar, missing keeps it
    #[serde(default)]
    pub avatar_url: Option<String>,
}
