//! Account and session endpoints

use futurebank_core::domain::auth::{Session, User};
use futurebank_core::dto::auth::{
    OAuthRedirect, RefreshRequest, ResendConfirmation, ResendResponse, SignInRequest,
    SignUpOutcome, SignUpRequest,
};
use reqwest::Method;

use crate::FutureBankClient;
use crate::error::Result;

impl FutureBankClient {
    /// Register an account with a username
    ///
    /// The outcome carries a session only when no e-mail confirmation is needed.
    pub async fn sign_up(&self, req: &SignUpRequest) -> Result<SignUpOutcome> {
        let response = self
            .request(Method::POST, "/api/auth/signup")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    pub async fn sign_in(&self, req: &SignInRequest) -> Result<Session> {
        let response = self
            .request(Method::POST, "/api/auth/signin")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .request(Method::POST, "/api/auth/refresh")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// End the current session
    pub async fn sign_out(&self) -> Result<()> {
        let response = self
            .authed(Method::POST, "/api/auth/signout")?
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// The user the current token belongs to
    pub async fn session_user(&self) -> Result<User> {
        let response = self.authed(Method::GET, "/api/auth/session")?.send().await?;

        self.handle_response(response).await
    }

    pub async fn resend_confirmation(&self, email: &str) -> Result<ResendResponse> {
        let response = self
            .request(Method::POST, "/api/auth/resend-confirmation")
            .json(&ResendConfirmation {
                email: Some(email.to_string()),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// URL to open in a browser to sign in with `provider`
    pub async fn oauth_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<OAuthRedirect> {
        let mut request = self.request(Method::GET, &format!("/api/auth/oauth/{}", provider));
        if let Some(redirect_to) = redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}
