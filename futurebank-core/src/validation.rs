//! Input validation
//!
//! Checks applied to form submissions before anything reaches the store.
//! Successful validation returns the normalized values to persist.

use thiserror::Error;

use crate::domain::listing::{DEFAULT_CATEGORY, WantCriterion};
use crate::dto::auth::{SignInRequest, SignUpRequest};
use crate::dto::listing::{CreateOffer, CreateWant};

pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_CATEGORY_LEN: usize = 40;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Title is too long (max {max} characters)", max = MAX_TITLE_LEN)]
    TitleTooLong,

    #[error("Description is too long (max {max} characters)", max = MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,

    #[error("Category is too long (max {max} characters)", max = MAX_CATEGORY_LEN)]
    CategoryTooLong,

    #[error(
        "Username must be between {min} and {max} characters",
        min = USERNAME_MIN_LEN,
        max = USERNAME_MAX_LEN
    )]
    UsernameLength,

    #[error("Username can only contain letters, numbers, and underscores")]
    UsernameCharacters,

    #[error("Email is required")]
    MissingEmail,

    #[error("Email address is invalid")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Password must be at least {min} characters", min = PASSWORD_MIN_LEN)]
    PasswordTooShort,
}

/// Normalized title/description/category of an offer or want
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// Normalized want submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantDraft {
    pub listing: ListingDraft,
    pub criteria: Vec<WantCriterion>,
}

pub fn validate_offer(req: &CreateOffer) -> Result<ListingDraft, ValidationError> {
    validate_listing(
        &req.title,
        req.description.as_deref(),
        req.category.as_deref(),
    )
}

pub fn validate_want(req: &CreateWant) -> Result<WantDraft, ValidationError> {
    let listing = validate_listing(
        &req.title,
        req.description.as_deref(),
        req.category.as_deref(),
    )?;

    let mut criteria = Vec::with_capacity(req.criteria.len());
    for criterion in &req.criteria {
        if !criteria.contains(criterion) {
            criteria.push(*criterion);
        }
    }

    Ok(WantDraft { listing, criteria })
}

fn validate_listing(
    title: &str,
    description: Option<&str>,
    category: Option<&str>,
) -> Result<ListingDraft, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }

    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    if description
        .as_ref()
        .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
    {
        return Err(ValidationError::DescriptionTooLong);
    }

    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY);
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::CategoryTooLong);
    }

    Ok(ListingDraft {
        title: title.to_string(),
        description,
        category: category.to_string(),
    })
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::UsernameLength);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameCharacters);
    }

    Ok(())
}

/// Require a non-blank e-mail, returning it trimmed
pub fn require_email(email: Option<&str>) -> Result<&str, ValidationError> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or(ValidationError::MissingEmail)
}

pub fn validate_sign_up(req: &SignUpRequest) -> Result<(), ValidationError> {
    let email = require_email(Some(&req.email))?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    if req.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if req.password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }

    validate_username(&req.username)
}

pub fn validate_sign_in(req: &SignInRequest) -> Result<(), ValidationError> {
    require_email(Some(&req.email))?;
    if req.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// What a profile update does to the avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarUpdate {
    Keep,
    Clear,
    Set(String),
}

/// Interpret the avatar field of the settings form
///
/// A missing value keeps the current avatar; a blank one clears it.
pub fn avatar_update(avatar_url: Option<String>) -> AvatarUpdate {
    match avatar_url.as_deref().map(str::trim) {
        None => AvatarUpdate::Keep,
        Some("") => AvatarUpdate::Clear,
        Some(url) => AvatarUpdate::Set(url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(title: &str, category: Option<&str>) -> CreateOffer {
        CreateOffer {
            title: title.to_string(),
            description: Some("  Weekday mornings  ".to_string()),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_offer_without_title_is_rejected() {
        assert_eq!(
            validate_offer(&offer("   ", None)),
            Err(ValidationError::MissingTitle)
        );
    }

    #[test]
    fn test_offer_defaults_category_and_trims() {
        let draft = validate_offer(&offer(" Dog Walking ", Some(" "))).unwrap();
        assert_eq!(draft.title, "Dog Walking");
        assert_eq!(draft.description.as_deref(), Some("Weekday mornings"));
        assert_eq!(draft.category, "Misc");
    }

    #[test]
    fn test_offer_title_too_long() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            validate_offer(&offer(&title, None)),
            Err(ValidationError::TitleTooLong)
        );
    }

    #[test]
    fn test_want_criteria_deduplicated() {
        let req = CreateWant {
            title: "Help with Bike Repair".to_string(),
            description: None,
            category: Some("Repair".to_string()),
            criteria: vec![
                WantCriterion::InPerson,
                WantCriterion::Urgent,
                WantCriterion::InPerson,
            ],
        };

        let draft = validate_want(&req).unwrap();
        assert_eq!(
            draft.criteria,
            vec![WantCriterion::InPerson, WantCriterion::Urgent]
        );
        assert_eq!(draft.listing.category, "Repair");
        assert_eq!(draft.listing.description, None);
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("nova_17").is_ok());
        assert_eq!(
            validate_username("ab"),
            Err(ValidationError::UsernameLength)
        );
        assert_eq!(
            validate_username(&"a".repeat(21)),
            Err(ValidationError::UsernameLength)
        );
        assert_eq!(
            validate_username("nova!"),
            Err(ValidationError::UsernameCharacters)
        );
    }

    #[test]
    fn test_sign_up_rules() {
        let mut req = SignUpRequest {
            email: "nova@example.org".to_string(),
            password: "hunter22".to_string(),
            username: "nova".to_string(),
        };
        assert!(validate_sign_up(&req).is_ok());

        req.password = "short".to_string();
        assert_eq!(
            validate_sign_up(&req),
            Err(ValidationError::PasswordTooShort)
        );

        req.password = "hunter22".to_string();
        req.email = "nova".to_string();
        assert_eq!(validate_sign_up(&req), Err(ValidationError::InvalidEmail));

        req.email = " ".to_string();
        assert_eq!(validate_sign_up(&req), Err(ValidationError::MissingEmail));
    }

    #[test]
    fn test_require_email() {
        assert_eq!(require_email(None), Err(ValidationError::MissingEmail));
        assert_eq!(require_email(Some("")), Err(ValidationError::MissingEmail));
        assert_eq!(require_email(Some(" a@b.c ")), Ok("a@b.c"));
    }

    #[test]
    fn test_avatar_update() {
        assert_eq!(avatar_update(None), AvatarUpdate::Keep);
        assert_eq!(avatar_update(Some("  ".to_string())), AvatarUpdate::Clear);
        assert_eq!(
            avatar_update(Some(" https://img/a.png ".to_string())),
            AvatarUpdate::Set("https://img/a.png".to_string())
        );
    }
}
