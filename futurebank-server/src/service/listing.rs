//! Listing Service
//!
//! Business logic for offers and wants.

use futurebank_core::domain::auth::User;
use futurebank_core::domain::listing::{Offer, Want};
use futurebank_core::dto::listing::{CreateOffer, CreateWant};
use futurebank_core::validation::{ValidationError, validate_offer, validate_want};
use uuid::Uuid;

use crate::backend::{BackendError, DataStore};
use crate::repository::{offer_repository, want_repository};
use crate::service::profile_service;

/// Service error type
#[derive(Debug)]
pub enum ListingError {
    Validation(ValidationError),
    /// The owner's profile could not be found or created
    ProfileUnavailable(BackendError),
    Backend(BackendError),
}

impl From<BackendError> for ListingError {
    fn from(err: BackendError) -> Self {
        ListingError::Backend(err)
    }
}

impl From<ValidationError> for ListingError {
    fn from(err: ValidationError) -> Self {
        ListingError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;

/// Create an offer for the caller
pub async fn create_offer(
    store: &dyn DataStore,
    token: Option<&str>,
    user: &User,
    req: CreateOffer,
) -> Result<Offer> {
    let draft = validate_offer(&req)?;

    profile_service::ensure_profile(store, token, user)
        .await
        .map_err(ListingError::ProfileUnavailable)?;

    let offer = offer_repository::insert(store, token, user.id, &draft).await?;

    tracing::info!("Offer created: {} ({})", draft.title, offer.id);

    Ok(offer)
}

/// Create a want for the caller
pub async fn create_want(
    store: &dyn DataStore,
    token: Option<&str>,
    user: &User,
    req: CreateWant,
) -> Result<Want> {
    let draft = validate_want(&req)?;

    profile_service::ensure_profile(store, token, user)
        .await
        .map_err(ListingError::ProfileUnavailable)?;

    let want = want_repository::insert(store, token, user.id, &draft).await?;

    tracing::info!("Want created: {} ({})", draft.listing.title, want.id);

    Ok(want)
}

/// List a member's offers
pub async fn list_offers(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Vec<Offer>> {
    Ok(offer_repository::list_by_user(store, token, user_id).await?)
}

/// List a member's wants
pub async fn list_wants(
    store: &dyn DataStore,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Vec<Want>> {
    Ok(want_repository::list_by_user(store, token, user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, Table};
    use futurebank_core::domain::listing::WantCriterion;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("nova@example.org".to_string()),
            email_confirmed_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_title_never_reaches_store() {
        let store = MemoryBackend::new();
        let result = create_offer(&store, None, &user(), CreateOffer::default()).await;

        assert!(matches!(
            result,
            Err(ListingError::Validation(ValidationError::MissingTitle))
        ));
        assert_eq!(store.row_count(Table::Offers).await, 0);
        assert_eq!(store.row_count(Table::Profiles).await, 0);
    }

    #[tokio::test]
    async fn test_create_offer_ensures_profile() {
        let store = MemoryBackend::new();
        let member = user();

        let offer = create_offer(
            &store,
            None,
            &member,
            CreateOffer {
                title: "Dog Walking".to_string(),
                description: Some("30-minute walks on weekday mornings".to_string()),
                category: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(offer.user_id, member.id);
        assert_eq!(offer.category.as_deref(), Some("Misc"));
        assert_eq!(store.row_count(Table::Profiles).await, 1);

        create_offer(
            &store,
            None,
            &member,
            CreateOffer {
                title: "Tutoring".to_string(),
                ..CreateOffer::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(store.row_count(Table::Profiles).await, 1);
        assert_eq!(list_offers(&store, None, member.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_want_with_criteria() {
        let store = MemoryBackend::new();
        let member = user();

        let want = create_want(
            &store,
            None,
            &member,
            CreateWant {
                title: "Help with Bike Repair".to_string(),
                description: None,
                category: Some("Repair".to_string()),
                criteria: vec![WantCriterion::InPerson, WantCriterion::InPerson],
            },
        )
        .await
        .unwrap();

        assert_eq!(want.criteria, vec![WantCriterion::InPerson]);
        let wants = list_wants(&store, None, member.id).await.unwrap();
        assert_eq!(wants, vec![want]);
        let others = list_wants(&store, None, Uuid::new_v4()).await.unwrap();
        assert!(others.is_empty());
    }
}
