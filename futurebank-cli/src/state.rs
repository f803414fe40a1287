//! Local CLI state
//!
//! The session and the last dashboard shown are kept in a JSON file between
//! invocations. Session changes go through [`CliState::apply`] so the cached
//! balance and listings never outlive the session they belong to.

use std::path::Path;

use anyhow::{Context, Result};
use futurebank_client::FutureBankClient;
use futurebank_core::dashboard::DashboardState;
use futurebank_core::domain::auth::{AuthEvent, Session};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliState {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub dashboard: DashboardState,
}

impl CliState {
    /// Read the state file; a missing file is an empty state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt state file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write state file: {}", path.display()))
    }

    /// React to a session change
    pub fn apply(&mut self, event: AuthEvent) {
        self.dashboard.apply(&event);
        self.session = match event {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => Some(session),
            AuthEvent::SignedOut => None,
        };
    }

    pub fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Not signed in. Run `futurebank auth login` first."))
    }

    /// Client carrying the current access token, if any
    pub fn client(&self, config: &Config) -> FutureBankClient {
        let client = FutureBankClient::new(&config.server_url);
        match &self.session {
            Some(session) => client.with_token(&session.access_token),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futurebank_core::domain::auth::User;
    use futurebank_core::domain::profile::Profile;

    fn session() -> Session {
        Session {
            access_token: "tok".to_string(),
            refresh_token: "ref".to_string(),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            user: User {
                id: uuid::Uuid::new_v4(),
                email: Some("nova@example.org".to_string()),
                email_confirmed_at: None,
            },
        }
    }

    #[test]
    fn test_sign_out_clears_cached_dashboard() {
        let mut state = CliState::default();
        let session = session();
        state.apply(AuthEvent::SignedIn(session.clone()));

        let mut profile = Profile::with_username(session.user.id, "nova");
        profile.time_balance = 4.0;
        state.dashboard.profile = Some(profile);
        assert_eq!(state.dashboard.balance(), Some(4.0));

        state.apply(AuthEvent::SignedOut);

        assert!(state.session.is_none());
        assert_eq!(state.dashboard.balance(), None);
        assert!(state.dashboard.offers.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("futurebank-cli-{}", uuid::Uuid::new_v4()))
            .join("state.json");

        assert!(CliState::load(&path).unwrap().session.is_none());

        let mut state = CliState::default();
        state.apply(AuthEvent::SignedIn(session()));
        state.save(&path).unwrap();

        let loaded = CliState::load(&path).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();

        assert_eq!(loaded.session, state.session);
        assert!(loaded.dashboard.is_signed_in());
    }

    #[test]
    fn test_require_session() {
        let state = CliState::default();
        assert!(state.require_session().is_err());
    }
}
