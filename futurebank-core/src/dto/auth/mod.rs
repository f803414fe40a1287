//! Authentication DTOs

use serde::{Deserialize, Serialize};

use crate::domain::auth::{Session, User};

/// Create an account with a chosen username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Exchange a refresh token for a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of `POST /api/auth/resend-confirmation`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResendConfirmation {
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful resend acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendResponse {
    pub success: bool,
}

/// Result of a sign-up
///
/// `session` is absent while the account waits for e-mail confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpOutcome {
    pub user: User,
    pub session: Option<Session>,
    pub profile_created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Where to send the user to start an OAuth sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthRedirect {
    pub url: String,
}
