//! Want Repository
//!
//! Handles all backend operations related to wants.

use futurebank_core::domain::listing::{Want, WantCriterion};
use futurebank_core::validation::WantDraft;
use serde::Serialize;
use uuid::Uuid;

use super::{decode_all, first_row};
use crate::backend::{BackendError, DataStore, Query, Table};

/// Row written for a new want
#[derive(Serialize)]
struct NewWant<'a> {
    title: &'a str,
    description: Option<&'a str>,
    category: &'a str,
    criteria: &'a [WantCriterion],
    user_id: Uuid,
}

/// Insert a want owned by `user_id`
pub async fn insert(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
    draft: &WantDraft,
) -> Result<Want, BackendError> {
    let row = serde_json::to_value(NewWant {
        title: &draft.listing.title,
        description: draft.listing.description.as_deref(),
        category: &draft.listing.category,
        criteria: &draft.criteria,
        user_id,
    })?;

    let rows = store.insert(token, Table::Wants, vec![row]).await?;
    first_row(rows, Table::Wants)
}

/// List all wants of one member
pub async fn list_by_user(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Vec<Want>, BackendError> {
    let query = Query::from(Table::Wants).eq("user_id", user_id);
    let rows = store.select(token, &query).await?;
    decode_all(rows)
}
