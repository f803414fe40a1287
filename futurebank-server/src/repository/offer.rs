//! Offer Repository
//!
//! Handles all backend operations related to offers.

use futurebank_core::domain::listing::Offer;
use futurebank_core::validation::ListingDraft;
use serde::Serialize;
use uuid::Uuid;

use super::{decode_all, first_row};
use crate::backend::{BackendError, DataStore, Query, Table};

/// Row written for a new offer
#[derive(Serialize)]
struct NewOffer<'a> {
    title: &'a str,
    description: Option<&'a str>,
    category: &'a str,
    user_id: Uuid,
}

/// Insert an offer owned by `user_id`
pub async fn insert(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
    draft: &ListingDraft,
) -> Result<Offer, BackendError> {
    let row = serde_json::to_value(NewOffer {
        title: &draft.title,
        description: draft.description.as_deref(),
        category: &draft.category,
        user_id,
    })?;

    let rows = store.insert(token, Table::Offers, vec![row]).await?;
    first_row(rows, Table::Offers)
}

/// List all offers of one member
pub async fn list_by_user(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Vec<Offer>, BackendError> {
    let query = Query::from(Table::Offers).eq("user_id", user_id);
    let rows = store.select(token, &query).await?;
    decode_all(rows)
}
