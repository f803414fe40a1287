//! Offer and want DTOs

use serde::{Deserialize, Serialize};

use crate::domain::listing::WantCriterion;

/// Form submission for a new offer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOffer {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Form submission for a new want
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWant {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub criteria: Vec<WantCriterion>,
}
