//! Kudos and pay-it-forward
//!
//! Kudos are acknowledgements given after an exchange. They are not
//! persisted; the only follow-up is an optional prefilled offer that invites
//! the member to pass on what they learned.

use thiserror::Error;

use crate::domain::community::KUDOS_OPTIONS;
use crate::dto::kudos::{CompletedExchange, OfferDraft};
use crate::features::FeatureFlags;

/// Category whose exchanges trigger a pay-it-forward suggestion
pub const PAY_IT_FORWARD_CATEGORY: &str = "Skills";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kudos `{0}`")]
pub struct UnknownKudos(pub String);

/// Check that `label` is one of [`KUDOS_OPTIONS`]
pub fn validate_kudos(label: &str) -> Result<(), UnknownKudos> {
    if KUDOS_OPTIONS.contains(&label) {
        Ok(())
    } else {
        Err(UnknownKudos(label.to_string()))
    }
}

/// Prefilled offer for a completed skills exchange, if enabled
pub fn pay_it_forward(exchange: &CompletedExchange, flags: &FeatureFlags) -> Option<OfferDraft> {
    if !flags.enable_pay_it_forward
        || exchange.category.as_deref() != Some(PAY_IT_FORWARD_CATEGORY)
    {
        return None;
    }

    let topic = exchange
        .title
        .split(" Lessons")
        .next()
        .unwrap_or(&exchange.title);

    Some(OfferDraft {
        title: format!("Offering beginner {} tips", topic),
        description: format!(
            "Inspired by a great community exchange, I'd like to share what I've learned about {}!",
            exchange.title.to_lowercase()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(title: &str, category: &str) -> CompletedExchange {
        CompletedExchange {
            title: title.to_string(),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_pay_it_forward_for_skills() {
        let draft = pay_it_forward(
            &exchange("Sourdough Baking Lessons", "Skills"),
            &FeatureFlags::default(),
        )
        .unwrap();

        assert_eq!(draft.title, "Offering beginner Sourdough Baking tips");
        assert_eq!(
            draft.description,
            "Inspired by a great community exchange, I'd like to share what I've learned about sourdough baking lessons!"
        );
    }

    #[test]
    fn test_title_without_lessons_suffix() {
        let draft = pay_it_forward(&exchange("Knitting", "Skills"), &FeatureFlags::default())
            .unwrap();
        assert_eq!(draft.title, "Offering beginner Knitting tips");
    }

    #[test]
    fn test_no_draft_for_other_categories() {
        let repair = exchange("Help with Bike Repair", "Repair");
        assert!(pay_it_forward(&repair, &FeatureFlags::default()).is_none());
    }

    #[test]
    fn test_no_draft_when_disabled() {
        let flags = FeatureFlags {
            enable_pay_it_forward: false,
            ..FeatureFlags::default()
        };
        assert!(pay_it_forward(&exchange("Sourdough Baking Lessons", "Skills"), &flags).is_none());
    }

    #[test]
    fn test_validate_kudos() {
        assert!(validate_kudos("Patient Listener").is_ok());
        assert_eq!(
            validate_kudos("patient listener"),
            Err(UnknownKudos("patient listener".to_string()))
        );
    }
}
