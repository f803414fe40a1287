//! Profile Repository
//!
//! Handles all backend operations related to profiles.

use futurebank_core::domain::profile::Profile;
use futurebank_core::validation::AvatarUpdate;
use serde_json::{Value, json, to_value};
use uuid::Uuid;

use super::{decode, first_row};
use crate::backend::{BackendError, DataStore, Query, Table};

/// Find a profile by its owner's id
pub async fn find_by_id(
    store: &dyn DataStore,
    token: Option<&str>,
    id: Uuid,
) -> Result<Option<Profile>, BackendError> {
    let query = Query::from(Table::Profiles).eq("id", id);
    store
        .select_single(token, &query)
        .await?
        .map(decode::<Profile>)
        .transpose()
}

/// Whether someone other than `owner` already uses `username`
pub async fn username_taken(
    store: &dyn DataStore,
    token: Option<&str>,
    username: &str,
    owner: Uuid,
) -> Result<bool, BackendError> {
    let query = Query::from(Table::Profiles)
        .select("id")
        .eq("username", username)
        .neq("id", owner);
    let rows = store.select(token, &query).await?;
    Ok(!rows.is_empty())
}

/// Insert a new profile
pub async fn insert(
    store: &dyn DataStore,
    token: Option<&str>,
    profile: &Profile,
) -> Result<Profile, BackendError> {
    let rows = store
        .insert(token, Table::Profiles, vec![to_value(profile)?])
        .await?;
    first_row(rows, Table::Profiles)
}

/// Update username and avatar of a profile
///
/// Returns `None` when no profile with `id` exists.
pub async fn update(
    store: &dyn DataStore,
    token: Option<&str>,
    id: Uuid,
    username: &str,
    avatar: &AvatarUpdate,
) -> Result<Option<Profile>, BackendError> {
    let mut patch = json!({ "username": username });
    match avatar {
        AvatarUpdate::Keep => {}
        AvatarUpdate::Clear => {
            patch["avatar_url"] = Value::Null;
        }
        AvatarUpdate::Set(url) => {
            patch["avatar_url"] = json!(url);
        }
    }

    let query = Query::from(Table::Profiles).eq("id", id);
    let rows = store.update(token, &query, patch).await?;

    if rows.is_empty() {
        return Ok(None);
    }
    first_row(rows, Table::Profiles).map(Some)
}
