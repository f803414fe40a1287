//! Backend Module
//!
//! Access to the hosted backend-as-a-service that owns authentication and
//! row storage. Everything the server persists or authenticates goes through
//! the two traits defined here, so the HTTP implementation can be swapped for
//! the in-memory one in development and tests.

pub mod error;
pub mod memory;
pub mod query;
pub mod supabase;

pub use error::{BackendError, Result};
pub use memory::MemoryBackend;
pub use query::{Filter, Query, Table};
pub use supabase::SupabaseClient;

use async_trait::async_trait;
use futurebank_core::domain::auth::{Session, User};
use serde_json::Value;

/// Outcome of a sign-up as reported by the auth service
///
/// `session` is `None` when the account must confirm its e-mail first.
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    pub user: User,
    pub session: Option<Session>,
}

/// Authentication operations of the hosted service
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account; `metadata` is stored alongside the user
    async fn sign_up(&self, email: &str, password: &str, metadata: Value)
    -> Result<SignUpResponse>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// URL that starts an OAuth sign-in with `provider`
    async fn oauth_authorize_url(&self, provider: &str, redirect_to: Option<&str>)
    -> Result<String>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    /// Session lookup: the user an access token belongs to
    async fn get_user(&self, access_token: &str) -> Result<User>;

    /// Send the sign-up confirmation e-mail again
    async fn resend_confirmation(&self, email: &str) -> Result<()>;
}

/// Generic table access of the hosted service
///
/// `token` is the caller's access token; `None` acts with the anonymous role.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn select(&self, token: Option<&str>, query: &Query) -> Result<Vec<Value>>;

    async fn insert(&self, token: Option<&str>, table: Table, rows: Vec<Value>)
    -> Result<Vec<Value>>;

    /// Apply `patch` to every row matching `query`, returning the updated rows
    async fn update(&self, token: Option<&str>, query: &Query, patch: Value)
    -> Result<Vec<Value>>;

    /// Fetch at most one row; zero rows is `Ok(None)`
    async fn select_single(&self, token: Option<&str>, query: &Query) -> Result<Option<Value>> {
        let mut rows = self.select(token, query).await?;
        if rows.len() > 1 {
            return Err(BackendError::MultipleRows(query.table()));
        }
        Ok(rows.pop())
    }
}
