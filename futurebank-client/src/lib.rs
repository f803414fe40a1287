//! FutureBank HTTP Client
//!
//! A type-safe HTTP client for the FutureBank server API, used by the CLI.
//!
//! # Example
//!
//! ```no_run
//! use futurebank_client::FutureBankClient;
//! use futurebank_core::dto::auth::SignInRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FutureBankClient::new("http://localhost:8080");
//!
//!     let session = client.sign_in(&SignInRequest {
//!         email: "nova@example.org".to_string(),
//!         password: "hunter22".to_string(),
//!     }).await?;
//!
//!     let client = client.with_token(session.access_token);
//!     let offers = client.list_offers().await?;
//!     println!("{} offers", offers.len());
//!     Ok(())
//! }
//! ```

mod auth;
mod community;
pub mod error;
mod listings;
mod profile;

pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the FutureBank server API
///
/// Calls that act on the caller's own data need a session token; attach one
/// with [`FutureBankClient::with_token`].
#[derive(Debug, Clone)]
pub struct FutureBankClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// Access token sent as a bearer token
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl FutureBankClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Same client, authenticated with `token`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request that carries the token when there is one
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Request that requires a token
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if self.token.is_none() {
            return Err(ClientError::NotSignedIn);
        }
        Ok(self.request(method, path))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = FutureBankClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_with_token() {
        let client = FutureBankClient::new("http://localhost:8080");
        assert_eq!(client.token(), None);

        let client = client.with_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }

    #[tokio::test]
    async fn test_authed_calls_need_a_token() {
        let client = FutureBankClient::new("http://localhost:8080");
        let err = client.list_offers().await.unwrap_err();
        assert!(matches!(err, ClientError::NotSignedIn));
    }
}
