//! Auth Service
//!
//! Sign-up, sign-in and session handling on top of the auth provider.

use futurebank_core::domain::auth::{Session, User};
use futurebank_core::domain::profile::Profile;
use futurebank_core::dto::auth::{
    OAuthRedirect, RefreshRequest, ResendConfirmation, SignInRequest, SignUpOutcome,
    SignUpRequest,
};
use futurebank_core::validation::{
    ValidationError, require_email, validate_sign_in, validate_sign_up,
};
use serde_json::json;

use crate::backend::{AuthProvider, BackendError, DataStore};
use crate::repository::profile_repository;

pub const PROFILE_SETUP_FAILED: &str =
    "Account created but profile setup failed. Please try signing in.";

/// Service error type
#[derive(Debug)]
pub enum AuthError {
    Validation(ValidationError),
    UnknownProvider(String),
    Backend(BackendError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        AuthError::Backend(err)
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Register an account and create its profile with the chosen username
///
/// The account exists once the provider accepted it, so a failed profile
/// insert is reported in the outcome rather than as an error.
pub async fn sign_up(
    auth: &dyn AuthProvider,
    store: &dyn DataStore,
    req: SignUpRequest,
) -> Result<SignUpOutcome> {
    validate_sign_up(&req)?;

    let email = req.email.trim();
    let response = auth
        .sign_up(email, &req.password, json!({ "username": req.username }))
        .await?;

    tracing::info!("Account registered: {}", response.user.id);

    let token = response.session.as_ref().map(|s| s.access_token.as_str());
    let profile = Profile::with_username(response.user.id, req.username.as_str());
    let profile_created = match profile_repository::insert(store, token, &profile).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!("Profile creation failed for {}: {}", response.user.id, err);
            false
        }
    };

    Ok(SignUpOutcome {
        user: response.user,
        session: response.session,
        profile_created,
        message: (!profile_created).then(|| PROFILE_SETUP_FAILED.to_string()),
    })
}

/// Password sign-in
pub async fn sign_in(auth: &dyn AuthProvider, req: SignInRequest) -> Result<Session> {
    validate_sign_in(&req)?;

    let session = auth
        .sign_in_with_password(req.email.trim(), &req.password)
        .await?;

    tracing::info!("Signed in: {}", session.user.id);

    Ok(session)
}

pub async fn refresh(auth: &dyn AuthProvider, req: RefreshRequest) -> Result<Session> {
    Ok(auth.refresh_session(&req.refresh_token).await?)
}

pub async fn sign_out(auth: &dyn AuthProvider, access_token: &str) -> Result<()> {
    auth.sign_out(access_token).await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Session lookup
pub async fn current_user(auth: &dyn AuthProvider, access_token: &str) -> Result<User> {
    Ok(auth.get_user(access_token).await?)
}

/// Start an OAuth sign-in
pub async fn oauth_redirect(
    auth: &dyn AuthProvider,
    provider: &str,
    redirect_to: Option<&str>,
) -> Result<OAuthRedirect> {
    let valid = !provider.is_empty()
        && provider
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(AuthError::UnknownProvider(provider.to_string()));
    }

    let url = auth.oauth_authorize_url(provider, redirect_to).await?;
    Ok(OAuthRedirect { url })
}

/// Send the confirmation e-mail again
pub async fn resend_confirmation(auth: &dyn AuthProvider, req: &ResendConfirmation) -> Result<()> {
    let email = require_email(req.email.as_deref())?;

    auth.resend_confirmation(email).await?;

    tracing::info!("Confirmation e-mail re-sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, Table};

    fn sign_up_request(email: &str, username: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_profile_with_username() {
        let backend = MemoryBackend::new();

        let req = sign_up_request("nova@example.org", "nova_17");
        let outcome = sign_up(&backend, &backend, req).await.unwrap();

        assert!(outcome.profile_created);
        assert!(outcome.message.is_none());
        assert!(outcome.session.is_none());

        let profile = profile_repository::find_by_id(&backend, None, outcome.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.username.as_deref(), Some("nova_17"));
        assert_eq!(profile.time_balance, 0.0);
    }

    #[tokio::test]
    async fn test_sign_up_validation_happens_first() {
        let backend = MemoryBackend::new();
        let req = sign_up_request("nova@example.org", "n!");
        let result = sign_up(&backend, &backend, req).await;

        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert_eq!(backend.row_count(Table::Profiles).await, 0);
    }

    #[tokio::test]
    async fn test_resend_requires_email() {
        let backend = MemoryBackend::new();
        let result = resend_confirmation(&backend, &ResendConfirmation { email: None }).await;
        assert!(matches!(
            result,
            Err(AuthError::Validation(ValidationError::MissingEmail))
        ));

        let ok = resend_confirmation(
            &backend,
            &ResendConfirmation {
                email: Some("nova@example.org".to_string()),
            },
        )
        .await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_oauth_rejects_odd_provider_names() {
        let backend = MemoryBackend::new();
        let result = oauth_redirect(&backend, "git hub", None).await;
        assert!(matches!(result, Err(AuthError::UnknownProvider(_))));
    }
}
