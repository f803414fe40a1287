//! Community-wide dashboard data
//!
//! Pulse stats, group projects and the shared fund are display-only: nothing
//! in this codebase mutates them.

use serde::{Deserialize, Serialize};

/// Acknowledgements a member can give after a completed exchange
pub const KUDOS_OPTIONS: [&str; 5] = [
    "Great Teacher",
    "Patient Listener",
    "Creative Problem-Solver",
    "Reliable & Punctual",
    "Generous Spirit",
];

/// Weekly activity summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityPulse {
    pub exchanges_this_week: u32,
    pub new_members: u32,
    pub active_projects: u32,
}

/// A group project members pool time credits into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityProject {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Credits needed
    pub goal: f64,
    /// Credits pledged so far
    pub current: f64,
    pub category: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl CommunityProject {
    /// Fraction of the goal reached, clamped to `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.goal <= 0.0 {
            return 0.0;
        }
        (self.current / self.goal).clamp(0.0, 1.0)
    }
}

/// The shared fund members can donate to or request from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityFund {
    pub balance: f64,
}

/// Offer count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSlice {
    pub category: String,
    pub count: u32,
}

/// Everything shown in the public part of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityBoard {
    #[serde(default)]
    pub pulse: CommunityPulse,
    #[serde(default)]
    pub projects: Vec<CommunityProject>,
    #[serde(default)]
    pub fund: CommunityFund,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(goal: f64, current: f64) -> CommunityProject {
        CommunityProject {
            id: 1,
            title: "Community Garden Weeding Day".to_string(),
            description: "Clear the garden plot".to_string(),
            goal,
            current,
            category: "Lifestyle".to_string(),
            participants: vec!["A".to_string()],
        }
    }

    #[test]
    fn test_project_progress() {
        assert_eq!(project(10.0, 7.5).progress(), 0.75);
        assert_eq!(project(8.0, 12.0).progress(), 1.0);
        assert_eq!(project(0.0, 3.0).progress(), 0.0);
    }

    #[test]
    fn test_board_from_partial_json() {
        let board: CommunityBoard =
            serde_json::from_str(r#"{ "fund": { "balance": 127.5 } }"#).unwrap();
        assert_eq!(board.fund.balance, 127.5);
        assert!(board.projects.is_empty());
        assert_eq!(board.pulse, CommunityPulse::default());
    }
}
