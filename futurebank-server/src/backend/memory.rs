//! In-memory backend
//!
//! Implements [`AuthProvider`] and [`DataStore`] inside the process for local
//! development and tests. It mirrors the behaviour the dashboard relies on
//! from the hosted service: `profiles.id` is a primary key, offers and wants
//! get generated ids and timestamps, and unconfirmed accounts cannot sign in.
//! Passwords are kept as given; never point real users at this backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use futurebank_core::domain::auth::{Session, User};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::{BackendError, Result, UNIQUE_VIOLATION};
use crate::backend::query::{Query, Table};
use crate::backend::{AuthProvider, DataStore, SignUpResponse};

const SESSION_TTL_SECONDS: i64 = 3600;

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    /// Accounts keyed by lowercase e-mail
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, Uuid>,
    refresh_tokens: HashMap<String, Uuid>,
    tables: HashMap<Table, Vec<Value>>,
    next_row_id: i64,
}

impl State {
    fn user_by_id(&self, id: Uuid) -> Option<&User> {
        self.accounts.values().map(|a| &a.user).find(|u| u.id == id)
    }

    fn issue_session(&mut self, user: User) -> Session {
        let access_token = Uuid::new_v4().simple().to_string();
        let refresh_token = Uuid::new_v4().simple().to_string();
        self.access_tokens.insert(access_token.clone(), user.id);
        self.refresh_tokens.insert(refresh_token.clone(), user.id);

        Session {
            access_token,
            refresh_token,
            expires_in: SESSION_TTL_SECONDS,
            token_type: "bearer".to_string(),
            user,
        }
    }

    fn check_token(&self, token: Option<&str>) -> Result<()> {
        match token {
            Some(token) if !self.access_tokens.contains_key(token) => Err(
                BackendError::Unauthorized("invalid access token".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// Process-local stand-in for the hosted backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// Confirm e-mails at sign-up and hand out a session right away
    auto_confirm: bool,
    state: RwLock<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_confirm(auto_confirm: bool) -> Self {
        Self {
            auto_confirm,
            state: RwLock::default(),
        }
    }

    /// Mark an account as confirmed, as following the e-mail link would
    ///
    /// Returns `false` when no account uses `email`.
    pub async fn confirm_email(&self, email: &str) -> bool {
        let mut state = self.state.write().await;
        match state.accounts.get_mut(&email.to_lowercase()) {
            Some(account) => {
                account.user.email_confirmed_at.get_or_insert_with(Utc::now);
                true
            }
            None => false,
        }
    }

    /// Number of rows currently stored in `table`
    pub async fn row_count(&self, table: Table) -> usize {
        self.state
            .read()
            .await
            .tables
            .get(&table)
            .map_or(0, Vec::len)
    }
}

fn invalid_credentials() -> BackendError {
    BackendError::api(
        400,
        Some("invalid_credentials".to_string()),
        "Invalid login credentials",
    )
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _metadata: Value,
    ) -> Result<SignUpResponse> {
        let mut state = self.state.write().await;
        let key = email.to_lowercase();

        if state.accounts.contains_key(&key) {
            return Err(BackendError::api(
                422,
                Some("user_already_exists".to_string()),
                "User already registered",
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            email_confirmed_at: self.auto_confirm.then(Utc::now),
        };
        state.accounts.insert(
            key,
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );

        let session = self.auto_confirm.then(|| state.issue_session(user.clone()));

        tracing::debug!("memory backend: registered {}", user.id);
        Ok(SignUpResponse { user, session })
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let mut state = self.state.write().await;

        let account = state
            .accounts
            .get(&email.to_lowercase())
            .filter(|a| a.password == password)
            .ok_or_else(invalid_credentials)?;

        if !account.user.is_confirmed() {
            return Err(BackendError::api(
                400,
                Some("email_not_confirmed".to_string()),
                "Email not confirmed",
            ));
        }

        let user = account.user.clone();
        Ok(state.issue_session(user))
    }

    async fn oauth_authorize_url(
        &self,
        provider: &str,
        _redirect_to: Option<&str>,
    ) -> Result<String> {
        Err(BackendError::Unsupported(format!("OAuth sign-in with {provider}")))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let mut state = self.state.write().await;

        let user_id = state
            .refresh_tokens
            .remove(refresh_token)
            .ok_or_else(|| BackendError::Unauthorized("invalid refresh token".to_string()))?;
        let user = state
            .user_by_id(user_id)
            .cloned()
            .ok_or_else(|| BackendError::Unauthorized("user no longer exists".to_string()))?;

        Ok(state.issue_session(user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let mut state = self.state.write().await;

        let user_id = state
            .access_tokens
            .remove(access_token)
            .ok_or_else(|| BackendError::Unauthorized("invalid access token".to_string()))?;

        // Sign-out revokes every session of the user.
        state.access_tokens.retain(|_, id| *id != user_id);
        state.refresh_tokens.retain(|_, id| *id != user_id);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        let state = self.state.read().await;
        state
            .access_tokens
            .get(access_token)
            .and_then(|id| state.user_by_id(*id))
            .cloned()
            .ok_or_else(|| BackendError::Unauthorized("invalid access token".to_string()))
    }

    async fn resend_confirmation(&self, email: &str) -> Result<()> {
        let state = self.state.read().await;
        match state.accounts.get(&email.to_lowercase()) {
            Some(account) if !account.user.is_confirmed() => {
                tracing::info!("memory backend: confirmation e-mail for {} re-sent", email);
            }
            // Unknown or confirmed addresses are accepted silently, like the
            // hosted service, so callers cannot tell which accounts exist.
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for MemoryBackend {
    async fn select(&self, token: Option<&str>, query: &Query) -> Result<Vec<Value>> {
        let state = self.state.read().await;
        state.check_token(token)?;

        Ok(state
            .tables
            .get(&query.table())
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.matches(row))
                    .map(|row| query.project(row))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        token: Option<&str>,
        table: Table,
        rows: Vec<Value>,
    ) -> Result<Vec<Value>> {
        let mut state = self.state.write().await;
        state.check_token(token)?;

        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(BackendError::Decode(format!(
                    "rows inserted into {table} must be objects"
                )));
            };

            match table {
                Table::Profiles => {
                    let id = fields.get("id").cloned().unwrap_or(Value::Null);
                    let exists = state
                        .tables
                        .get(&table)
                        .is_some_and(|existing| existing.iter().any(|r| r.get("id") == Some(&id)))
                        || prepared.iter().any(|r: &Value| r.get("id") == Some(&id));
                    if id.is_null() || exists {
                        return Err(BackendError::Conflict {
                            table: table.to_string(),
                            message: format!(
                                "duplicate key value violates unique constraint \"profiles_pkey\" ({UNIQUE_VIOLATION})"
                            ),
                        });
                    }
                    fields.entry("time_balance").or_insert(json!(0.0));
                }
                Table::Offers | Table::Wants => {
                    state.next_row_id += 1;
                    fields.insert("id".to_string(), json!(state.next_row_id));
                    fields
                        .entry("created_at")
                        .or_insert_with(|| json!(Utc::now()));
                }
            }

            prepared.push(Value::Object(fields));
        }

        state
            .tables
            .entry(table)
            .or_default()
            .extend(prepared.iter().cloned());
        Ok(prepared)
    }

    async fn update(&self, token: Option<&str>, query: &Query, patch: Value) -> Result<Vec<Value>> {
        let Value::Object(changes) = patch else {
            return Err(BackendError::Decode("update patch must be an object".to_string()));
        };

        let mut state = self.state.write().await;
        state.check_token(token)?;

        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(&query.table()) {
            for row in rows.iter_mut().filter(|row| query.matches(row)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &changes {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(query.project(row));
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn signed_in(backend: &MemoryBackend, email: &str) -> Session {
        backend.sign_up(email, "hunter22", json!({})).await.unwrap();
        backend.confirm_email(email).await;
        backend
            .sign_in_with_password(email, "hunter22")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unconfirmed_sign_in_is_rejected() {
        let backend = MemoryBackend::new();
        let outcome = backend
            .sign_up("nova@example.org", "hunter22", json!({}))
            .await
            .unwrap();
        assert!(outcome.session.is_none());
        assert!(!outcome.user.is_confirmed());

        let err = backend
            .sign_in_with_password("nova@example.org", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email not confirmed");

        assert!(backend.confirm_email("NOVA@example.org").await);
        assert!(
            backend
                .sign_in_with_password("nova@example.org", "hunter22")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_auto_confirm_returns_session() {
        let backend = MemoryBackend::with_auto_confirm(true);
        let outcome = backend
            .sign_up("river@example.org", "hunter22", json!({}))
            .await
            .unwrap();

        let session = outcome.session.unwrap();
        let user = backend.get_user(&session.access_token).await.unwrap();
        assert_eq!(user.id, outcome.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_and_bad_password() {
        let backend = MemoryBackend::new();
        signed_in(&backend, "a@b.c").await;
        let duplicate = backend.sign_up("A@b.c", "other22", json!({})).await;
        assert!(duplicate.is_err());

        let err = backend
            .sign_in_with_password("a@b.c", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_out_revokes_tokens() {
        let backend = MemoryBackend::new();
        let session = signed_in(&backend, "a@b.c").await;

        backend.sign_out(&session.access_token).await.unwrap();

        let err = backend.get_user(&session.access_token).await.unwrap_err();
        assert!(err.is_unauthorized());
        let refresh = backend.refresh_session(&session.refresh_token).await;
        assert!(refresh.is_err());
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let backend = MemoryBackend::new();
        let session = signed_in(&backend, "a@b.c").await;

        let refreshed = backend
            .refresh_session(&session.refresh_token)
            .await
            .unwrap();
        assert_ne!(refreshed.access_token, session.access_token);

        let reused = backend.refresh_session(&session.refresh_token).await;
        assert!(reused.is_err());
    }

    #[tokio::test]
    async fn test_profile_primary_key() {
        let backend = MemoryBackend::new();
        let id = Uuid::new_v4();
        let row = json!({ "id": id, "username": "nova", "avatar_url": null });

        backend
            .insert(None, Table::Profiles, vec![row.clone()])
            .await
            .unwrap();
        let err = backend
            .insert(None, Table::Profiles, vec![row])
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(backend.row_count(Table::Profiles).await, 1);
    }

    #[tokio::test]
    async fn test_listing_rows_get_ids_and_timestamps() {
        let backend = MemoryBackend::new();
        let user_id = Uuid::new_v4();
        let inserted = backend
            .insert(
                None,
                Table::Offers,
                vec![
                    json!({ "title": "Dog Walking", "user_id": user_id }),
                    json!({ "title": "Tutoring", "user_id": user_id }),
                ],
            )
            .await
            .unwrap();

        assert_eq!(inserted[0]["id"], json!(1));
        assert_eq!(inserted[1]["id"], json!(2));
        assert!(inserted[0].get("created_at").is_some());

        let query = Query::from(Table::Offers)
            .select("title")
            .eq("user_id", user_id);
        let rows = backend.select(None, &query).await.unwrap();
        assert_eq!(
            rows,
            vec![
                json!({ "title": "Dog Walking" }),
                json!({ "title": "Tutoring" })
            ]
        );
    }

    #[tokio::test]
    async fn test_update_and_single() {
        let backend = MemoryBackend::new();
        let id = Uuid::new_v4();
        let row = json!({ "id": id, "username": "nova" });
        backend
            .insert(None, Table::Profiles, vec![row])
            .await
            .unwrap();

        let query = Query::from(Table::Profiles).eq("id", id);
        let updated = backend
            .update(None, &query, json!({ "username": "nova_2" }))
            .await
            .unwrap();
        assert_eq!(updated[0]["username"], json!("nova_2"));

        let row = backend.select_single(None, &query).await.unwrap().unwrap();
        assert_eq!(row["time_balance"], json!(0.0));

        let missing = Query::from(Table::Profiles).eq("id", Uuid::new_v4());
        let row = backend.select_single(None, &missing).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_rejects_unknown_token() {
        let backend = MemoryBackend::new();
        let err = backend
            .select(Some("forged"), &Query::from(Table::Offers))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
