//! Kudos DTOs

use serde::{Deserialize, Serialize};

/// The exchange a member just completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedExchange {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Give kudos for a completed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudosRequest {
    pub exchange: CompletedExchange,
    pub kudos: String,
}

/// Prefilled offer suggested after a rewarding exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub title: String,
    pub description: String,
}

/// Acknowledgement of a kudos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudosReceipt {
    pub kudos: String,
    #[serde(default)]
    pub pay_it_forward: Option<OfferDraft>,
}
