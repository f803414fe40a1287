//! GoTrue endpoints

use async_trait::async_trait;
use futurebank_core::domain::auth::{Session, User};
use serde_json::{Value, json};

use super::SupabaseClient;
use crate::backend::error::{BackendError, Result};
use crate::backend::{AuthProvider, SignUpResponse};

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<SignUpResponse> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self
            .authorize(self.client.post(&url), None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": metadata,
            }))
            .send()
            .await?;

        let body: Value = self.handle_response(response).await?;
        parse_sign_up(body)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = self
            .authorize(self.client.post(&url), None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn oauth_authorize_url(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<String> {
        let mut params = vec![("provider", provider)];
        if let Some(redirect_to) = redirect_to {
            params.push(("redirect_to", redirect_to));
        }

        let url = reqwest::Url::parse_with_params(
            &format!("{}/auth/v1/authorize", self.base_url),
            &params,
        )
        .map_err(|e| BackendError::Decode(format!("invalid authorize URL: {}", e)))?;

        Ok(url.to_string())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = self
            .authorize(self.client.post(&url), None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .authorize(self.client.post(&url), Some(access_token))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .authorize(self.client.get(&url), Some(access_token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn resend_confirmation(&self, email: &str) -> Result<()> {
        let url = format!("{}/auth/v1/resend", self.base_url);
        let response = self
            .authorize(self.client.post(&url), None)
            .json(&json!({ "type": "signup", "email": email }))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

/// Sign-up answers with a full session when the project auto-confirms
/// e-mails, and with the bare user otherwise.
fn parse_sign_up(body: Value) -> Result<SignUpResponse> {
    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body)?;
        return Ok(SignUpResponse {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user = match body.get("user") {
        Some(user) => serde_json::from_value(user.clone())?,
        None => serde_json::from_value(body)?,
    };
    Ok(SignUpResponse {
        user,
        session: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_awaiting_confirmation() {
        let body = json!({
            "id": "8d1f2c7e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
            "email": "nova@example.org",
            "email_confirmed_at": null,
            "user_metadata": { "username": "nova" }
        });

        let outcome = parse_sign_up(body).unwrap();
        assert!(outcome.session.is_none());
        assert_eq!(outcome.user.email.as_deref(), Some("nova@example.org"));
    }

    #[test]
    fn test_sign_up_with_session() {
        let body = json!({
            "access_token": "jwt",
            "refresh_token": "r1",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {
                "id": "8d1f2c7e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
                "email": "nova@example.org",
                "email_confirmed_at": "2025-06-01T10:00:00Z"
            }
        });

        let outcome = parse_sign_up(body).unwrap();
        assert!(outcome.user.is_confirmed());
        assert_eq!(outcome.session.unwrap().access_token, "jwt");
    }

    #[tokio::test]
    async fn test_oauth_url() {
        let client = SupabaseClient::new("https://demo.supabase.co", "anon");
        let url = client
            .oauth_authorize_url("github", Some("http://localhost:3000/auth/callback"))
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://demo.supabase.co/auth/v1/authorize?provider=github&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
        );
    }
}
