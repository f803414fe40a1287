//! Dashboard view model
//!
//! Decides which dashboard sections are shown for a request and carries the
//! client-side state (who is signed in, their balance and listings).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::auth::{AuthEvent, User};
use crate::domain::community::{
    CommunityBoard, CommunityFund, CommunityProject, CommunityPulse, ContributionSlice,
};
use crate::domain::listing::{DEFAULT_CATEGORY, Offer, Want};
use crate::domain::profile::Profile;
use crate::features::FeatureFlags;

/// A dashboard card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    CommunityPulse,
    GroupProjects,
    CommunityFund,
    MyOffers,
    MyWants,
    ContributionConstellation,
    Marketplace,
}

/// The signed-in member's part of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalDashboard {
    pub user: User,
    pub profile: Option<Profile>,
    pub offers: Vec<Offer>,
    pub wants: Vec<Want>,
    #[serde(default)]
    pub contributions: Vec<ContributionSlice>,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub features: FeatureFlags,
    pub show_welcome: bool,
    pub email_confirmation_required: bool,
    pub sections: Vec<Section>,
    pub pulse: Option<CommunityPulse>,
    pub projects: Option<Vec<CommunityProject>>,
    pub fund: Option<CommunityFund>,
    pub personal: Option<PersonalDashboard>,
}

impl DashboardView {
    /// Lay out the dashboard
    ///
    /// Community sections appear only when their flag is on. Personal sections
    /// need a signed-in member; the constellation also needs its flag.
    pub fn assemble(
        flags: FeatureFlags,
        board: &CommunityBoard,
        personal: Option<PersonalDashboard>,
    ) -> Self {
        let mut sections = Vec::new();

        let pulse = flags.show_community_pulse.then(|| {
            sections.push(Section::CommunityPulse);
            board.pulse.clone()
        });
        let projects = flags.show_group_projects.then(|| {
            sections.push(Section::GroupProjects);
            board.projects.clone()
        });
        let fund = flags.show_community_fund.then(|| {
            sections.push(Section::CommunityFund);
            board.fund.clone()
        });

        let personal = personal.map(|mut personal| {
            sections.push(Section::MyOffers);
            sections.push(Section::MyWants);
            if flags.show_contribution_constellation {
                sections.push(Section::ContributionConstellation);
            } else {
                personal.contributions.clear();
            }
            personal
        });

        sections.push(Section::Marketplace);

        let email_confirmation_required = personal.as_ref().is_some_and(|p| !p.user.is_confirmed());

        Self {
            features: flags,
            show_welcome: flags.show_welcome_ritual,
            email_confirmation_required,
            sections,
            pulse,
            projects,
            fund,
            personal,
        }
    }

    pub fn shows(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}

/// Per-category offer counts, largest first
pub fn contribution_slices(offers: &[Offer]) -> Vec<ContributionSlice> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for offer in offers {
        let category = offer
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        *counts.entry(category).or_default() += 1;
    }

    let mut slices: Vec<ContributionSlice> = counts
        .into_iter()
        .map(|(category, count)| ContributionSlice {
            category: category.to_string(),
            count,
        })
        .collect();
    // BTreeMap order already sorts ties by category; stable sort keeps it.
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

/// What a client currently displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub offers: Vec<Offer>,
    pub wants: Vec<Want>,
}

impl DashboardState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Displayed balance; `None` when signed out or before the profile loads
    pub fn balance(&self) -> Option<f64> {
        self.user.as_ref()?;
        self.profile.as_ref().map(|p| p.time_balance)
    }

    /// React to a session change
    pub fn apply(&mut self, event: &AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => {
                let same_user = self.user.as_ref().is_some_and(|u| u.id == session.user.id);
                if !same_user {
                    self.clear();
                }
                self.user = Some(session.user.clone());
            }
            AuthEvent::SignedOut => self.clear(),
        }
    }

    /// Replace displayed data with a freshly loaded dashboard
    pub fn load(&mut self, personal: &PersonalDashboard) {
        self.user = Some(personal.user.clone());
        self.profile = personal.profile.clone();
        self.offers = personal.offers.clone();
        self.wants = personal.wants.clone();
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
