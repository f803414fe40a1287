//! Profile Service
//!
//! Get-or-create of profiles and the profile settings form.

use futurebank_core::domain::auth::User;
use futurebank_core::domain::profile::Profile;
use futurebank_core::dto::profile::UpdateProfile;
use futurebank_core::validation::{ValidationError, avatar_update, validate_username};
use uuid::Uuid;

use crate::backend::{BackendError, DataStore};
use crate::repository::profile_repository;

/// Service error type
#[derive(Debug)]
pub enum ProfileError {
    NotFound(Uuid),
    Validation(ValidationError),
    UsernameTaken(String),
    Backend(BackendError),
}

impl From<BackendError> for ProfileError {
    fn from(err: BackendError) -> Self {
        ProfileError::Backend(err)
    }
}

impl From<ValidationError> for ProfileError {
    fn from(err: ValidationError) -> Self {
        ProfileError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// A profile that is known to exist
#[derive(Debug, Clone)]
pub struct EnsuredProfile {
    pub profile: Profile,
    /// Whether this call inserted it
    pub created: bool,
}

/// Look up the user's profile, inserting the default record when missing
///
/// Safe to call concurrently for the same user: the primary key on
/// `profiles.id` rejects the second insert and the winner's row is returned.
pub async fn ensure_profile(
    store: &dyn DataStore,
    token: Option<&str>,
    user: &User,
) -> std::result::Result<EnsuredProfile, BackendError> {
    if let Some(profile) = profile_repository::find_by_id(store, token, user.id).await? {
        return Ok(EnsuredProfile {
            profile,
            created: false,
        });
    }

    let default = Profile::default_for(user);
    match profile_repository::insert(store, token, &default).await {
        Ok(profile) => {
            tracing::info!(
                "Profile created for {} ({})",
                profile.display_name(),
                user.id
            );
            Ok(EnsuredProfile {
                profile,
                created: true,
            })
        }
        Err(err) if err.is_conflict() => {
            tracing::debug!("Profile for {} created concurrently", user.id);
            let profile = profile_repository::find_by_id(store, token, user.id)
                .await?
                .ok_or(err)?;
            Ok(EnsuredProfile {
                profile,
                created: false,
            })
        }
        Err(err) => Err(err),
    }
}

/// The caller's profile, created on first access
pub async fn get_profile(
    store: &dyn DataStore,
    token: Option<&str>,
    user: &User,
) -> Result<Profile> {
    Ok(ensure_profile(store, token, user).await?.profile)
}

/// Apply the profile settings form
pub async fn update_profile(
    store: &dyn DataStore,
    token: Option<&str>,
    user: &User,
    req: UpdateProfile,
) -> Result<Profile> {
    let username = req.username.trim();
    validate_username(username)?;
    let avatar = avatar_update(req.avatar_url);

    if profile_repository::username_taken(store, token, username, user.id).await? {
        return Err(ProfileError::UsernameTaken(username.to_string()));
    }

    ensure_profile(store, token, user).await?;

    let profile = profile_repository::update(store, token, user.id, username, &avatar)
        .await?
        .ok_or(ProfileError::NotFound(user.id))?;

    tracing::info!("Profile updated: {} ({})", profile.display_name(), user.id);

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, Table};
    use std::sync::Arc;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            email_confirmed_at: None,
        }
    }

    #[tokio::test]
    async fn test_ensure_profile_is_idempotent() {
        let store = MemoryBackend::new();
        let member = user("nova@example.org");

        let first = ensure_profile(&store, None, &member).await.unwrap();
        let second = ensure_profile(&store, None, &member).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.profile, second.profile);
        assert_eq!(first.profile.username.as_deref(), Some("nova"));
        assert_eq!(store.row_count(Table::Profiles).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_creates_one_row() {
        let store = Arc::new(MemoryBackend::new());
        let member = user("river@example.org");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let member = member.clone();
                tokio::spawn(async move { ensure_profile(store.as_ref(), None, &member).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            let ensured = handle.await.unwrap().unwrap();
            assert_eq!(ensured.profile.id, member.id);
            if ensured.created {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.row_count(Table::Profiles).await, 1);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_taken_username() {
        let store = MemoryBackend::new();
        let nova = user("nova@example.org");
        let river = user("river@example.org");
        ensure_profile(&store, None, &nova).await.unwrap();

        let result = update_profile(
            &store,
            None,
            &river,
            UpdateProfile {
                username: "nova".to_string(),
                avatar_url: None,
            },
        )
        .await;
        assert!(matches!(result, Err(ProfileError::UsernameTaken(name)) if name == "nova"));

        // Keeping one's own name is fine
        let kept = update_profile(
            &store,
            None,
            &nova,
            UpdateProfile {
                username: "nova".to_string(),
                avatar_url: Some("https://img.example/nova.png".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            kept.avatar_url.as_deref(),
            Some("https://img.example/nova.png")
        );
    }

    #[tokio::test]
    async fn test_update_profile_keeps_avatar_unless_cleared() {
        const AVATAR: &str = "https://img.example/n.png";
        let store = MemoryBackend::new();
        let nova = user("nova@example.org");
        let update = |username: &str, avatar_url: Option<&str>| UpdateProfile {
            username: username.to_string(),
            avatar_url: avatar_url.map(str::to_string),
        };

        update_profile(&store, None, &nova, update("nova", Some(AVATAR)))
            .await
            .unwrap();

        let renamed = update_profile(&store, None, &nova, update("nova_2", None))
            .await
            .unwrap();
        assert_eq!(renamed.username.as_deref(), Some("nova_2"));
        assert_eq!(renamed.avatar_url.as_deref(), Some(AVATAR));

        let cleared = update_profile(&store, None, &nova, update("nova_2", Some("")))
            .await
            .unwrap();
        assert_eq!(cleared.avatar_url, None);
    }

    #[tokio::test]
    async fn test_update_profile_validates_username() {
        let store = MemoryBackend::new();
        let result = update_profile(
            &store,
            None,
            &user("a@b.c"),
            UpdateProfile {
                username: "no spaces".to_string(),
                avatar_url: None,
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(ProfileError::Validation(ValidationError::UsernameCharacters))
        ));
    }
}
