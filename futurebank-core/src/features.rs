//! Feature flags
//!
//! Switches for the optional dashboard sections and community features.
//! Everything is on unless explicitly disabled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub show_welcome_ritual: bool,
    pub show_community_pulse: bool,
    pub show_contribution_constellation: bool,
    pub enable_kudos_system: bool,
    pub enable_pay_it_forward: bool,
    pub show_group_projects: bool,
    pub show_community_fund: bool,
    pub enable_request_amplification: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feature flag `{0}`")]
pub struct UnknownFeature(pub String);

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_welcome_ritual: true,
            show_community_pulse: true,
            show_contribution_constellation: true,
            enable_kudos_system: true,
            enable_pay_it_forward: true,
            show_group_projects: true,
            show_community_fund: true,
            enable_request_amplification: true,
        }
    }
}

impl FeatureFlags {
    pub const NAMES: [&'static str; 8] = [
        "show_welcome_ritual",
        "show_community_pulse",
        "show_contribution_constellation",
        "enable_kudos_system",
        "enable_pay_it_forward",
        "show_group_projects",
        "show_community_fund",
        "enable_request_amplification",
    ];

    /// All flags on except the comma-separated names in `disabled`
    pub fn with_disabled(disabled: &str) -> Result<Self, UnknownFeature> {
        let mut flags = Self::default();
        for name in disabled.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            *flags.flag_mut(name)? = false;
        }
        Ok(flags)
    }

    /// Names of the flags that are switched off
    pub fn disabled(&self) -> Vec<&'static str> {
        let mut flags = *self;
        Self::NAMES
            .into_iter()
            .filter(|name| matches!(flags.flag_mut(name), Ok(on) if !*on))
            .collect()
    }

    fn flag_mut(&mut self, name: &str) -> Result<&mut bool, UnknownFeature> {
        let flag = match name {
            "show_welcome_ritual" => &mut self.show_welcome_ritual,
            "show_community_pulse" => &mut self.show_community_pulse,
            "show_contribution_constellation" => &mut self.show_contribution_constellation,
            "enable_kudos_system" => &mut self.enable_kudos_system,
            "enable_pay_it_forward" => &mut self.enable_pay_it_forward,
            "show_group_projects" => &mut self.show_group_projects,
            "show_community_fund" => &mut self.show_community_fund,
            "enable_request_amplification" => &mut self.enable_request_amplification,
            other => return Err(UnknownFeature(other.to_string())),
        };
        Ok(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_enabled_by_default() {
        let flags = FeatureFlags::default();
        assert!(flags.show_welcome_ritual);
        assert!(flags.enable_request_amplification);
        assert_eq!(FeatureFlags::with_disabled("").unwrap(), flags);
    }

    #[test]
    fn test_disable_list() {
        let flags =
            FeatureFlags::with_disabled(" show_community_fund, enable_kudos_system ,").unwrap();
        assert!(!flags.show_community_fund);
        assert!(!flags.enable_kudos_system);
        assert!(flags.show_community_pulse);
        assert_eq!(
            flags.disabled(),
            vec!["enable_kudos_system", "show_community_fund"]
        );
        assert!(FeatureFlags::default().disabled().is_empty());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = FeatureFlags::with_disabled("show_fireworks").unwrap_err();
        assert_eq!(err, UnknownFeature("show_fireworks".to_string()));
    }

    #[test]
    fn test_every_name_is_recognized() {
        for name in FeatureFlags::NAMES {
            assert!(FeatureFlags::with_disabled(name).is_ok(), "{name}");
        }
    }
}
