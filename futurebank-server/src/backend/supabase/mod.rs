//! Supabase HTTP backend
//!
//! Talks to a hosted Supabase project: GoTrue under `/auth/v1` for accounts
//! and sessions, PostgREST under `/rest/v1` for table access. Every request
//! carries the project's anon key in the `apikey` header; table requests
//! authenticate as the caller when an access token is supplied so row-level
//! security applies.

mod auth;
mod rest;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::backend::error::{BackendError, Result, UNIQUE_VIOLATION};

/// Client for one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    /// Project URL (e.g., "https://abcd.supabase.co")
    base_url: String,
    /// Public anon key of the project
    anon_key: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a client for the project at `base_url`
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::with_client(base_url, anon_key, Client::new())
    }

    /// Create a client with a custom HTTP client (timeouts, proxies, TLS, ...)
    pub fn with_client(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach the project key and the bearer token (caller's, or the anon key)
    fn authorize(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            BackendError::Decode(format!("failed to parse JSON response: {}", e))
        })
    }

    /// Check the status of a response without a meaningful body
    async fn handle_empty_response(&self, response: Response) -> Result<()> {
        check_status(response).await.map(|_| ())
    }
}

/// Error payload shapes of GoTrue and PostgREST, merged
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn code(&self) -> Option<String> {
        self.error_code.clone().or_else(|| {
            self.code.as_ref().and_then(|code| match code {
                serde_json::Value::String(s) => Some(s.clone()),
                // GoTrue reports the HTTP status as a numeric `code`
                _ => None,
            })
        })
    }

    fn message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &text))
}

/// Map an error response onto [`BackendError`]
fn error_from_body(status: u16, text: &str) -> BackendError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let code = body.code();
    let message = body
        .message()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if text.is_empty() {
                format!("request failed with status {}", status)
            } else {
                text.to_string()
            }
        });

    if code.as_deref() == Some(UNIQUE_VIOLATION) {
        return BackendError::Conflict {
            table: String::new(),
            message,
        };
    }

    if status == 401 {
        return BackendError::Unauthorized(message);
    }

    BackendError::api(status, code, message)
}
