//! Offer and want domain types
//!
//! Offers are skills or services a member makes available; wants are needs a
//! member asks the community for. Both are created once and never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category applied when a listing is submitted without one
pub const DEFAULT_CATEGORY: &str = "Misc";

/// A skill or service a member offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub user_id: Uuid,
}

/// A need a member lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Want {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "criteria_or_empty")]
    pub criteria: Vec<WantCriterion>,
    pub user_id: Uuid,
}

/// Requirements or preferences attached to a want
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WantCriterion {
    InPerson,
    Remote,
    FlexibleSchedule,
    BeginnerFriendly,
    MaterialsProvided,
    Urgent,
}

impl WantCriterion {
    pub const ALL: [WantCriterion; 6] = [
        WantCriterion::InPerson,
        WantCriterion::Remote,
        WantCriterion::FlexibleSchedule,
        WantCriterion::BeginnerFriendly,
        WantCriterion::MaterialsProvided,
        WantCriterion::Urgent,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            WantCriterion::InPerson => "In person",
            WantCriterion::Remote => "Remote OK",
            WantCriterion::FlexibleSchedule => "Flexible schedule",
            WantCriterion::BeginnerFriendly => "Beginner friendly",
            WantCriterion::MaterialsProvided => "Materials provided",
            WantCriterion::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for WantCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for WantCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "in_person" => Ok(WantCriterion::InPerson),
            "remote" => Ok(WantCriterion::Remote),
            "flexible_schedule" => Ok(WantCriterion::FlexibleSchedule),
            "beginner_friendly" => Ok(WantCriterion::BeginnerFriendly),
            "materials_provided" => Ok(WantCriterion::MaterialsProvided),
            "urgent" => Ok(WantCriterion::Urgent),
            _ => Err(format!("unknown criterion `{}`", s)),
        }
    }
}

// The store keeps criteria in a nullable array column.
fn criteria_or_empty<'de, D>(deserializer: D) -> Result<Vec<WantCriterion>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<WantCriterion>>::deserialize(deserializer)?.unwrap_or_default())
}
