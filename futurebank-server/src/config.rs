//! Server configuration
//!
//! Everything comes from environment variables; see [`Config::from_env`].

use std::path::PathBuf;

use futurebank_core::domain::community::CommunityBoard;
use futurebank_core::features::FeatureFlags;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which backend serves auth and data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Supabase,
    /// In-process backend, state is lost on restart
    Memory,
}

impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(BackendKind::Supabase),
            "memory" => Ok(BackendKind::Memory),
            other => anyhow::bail!("unknown backend `{}` (expected supabase or memory)", other),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    pub backend: BackendKind,

    /// Project URL of the hosted backend (e.g., "https://xyz.supabase.co")
    pub supabase_url: Option<String>,

    /// Public anon key sent with every backend request
    pub supabase_anon_key: Option<String>,

    pub features: FeatureFlags,

    /// JSON file with pulse stats, group projects and fund balance
    pub community_file: Option<PathBuf>,

    /// Memory backend only: skip the e-mail confirmation step
    pub memory_auto_confirm: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            backend: BackendKind::Supabase,
            supabase_url: None,
            supabase_anon_key: None,
            features: FeatureFlags::default(),
            community_file: None,
            memory_auto_confirm: false,
        }
    }
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - FUTUREBANK_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - FUTUREBANK_BACKEND (optional, supabase | memory, default: supabase)
    /// - SUPABASE_URL (required for supabase)
    /// - SUPABASE_ANON_KEY (required for supabase)
    /// - FUTUREBANK_DISABLED_FEATURES (optional, comma-separated flag names)
    /// - FUTUREBANK_COMMUNITY_FILE (optional, path to a JSON community board)
    /// - FUTUREBANK_MEMORY_AUTOCONFIRM (optional, true/false, default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr =
            var("FUTUREBANK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let backend = match var("FUTUREBANK_BACKEND") {
            Some(value) => value.parse()?,
            None => BackendKind::Supabase,
        };

        let features = match var("FUTUREBANK_DISABLED_FEATURES") {
            Some(value) => FeatureFlags::with_disabled(&value)?,
            None => FeatureFlags::default(),
        };

        let memory_auto_confirm = match var("FUTUREBANK_MEMORY_AUTOCONFIRM") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!(
                    "FUTUREBANK_MEMORY_AUTOCONFIRM must be true or false, got `{}`",
                    value
                )
            })?,
            None => false,
        };

        Ok(Self {
            bind_addr,
            backend,
            supabase_url: var("SUPABASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: var("SUPABASE_ANON_KEY"),
            features,
            community_file: var("FUTUREBANK_COMMUNITY_FILE").map(PathBuf::from),
            memory_auto_confirm,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.backend == BackendKind::Supabase {
            let url = self
                .supabase_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("SUPABASE_URL environment variable not set"))?;

            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("SUPABASE_URL must start with http:// or https://");
            }

            if self.supabase_anon_key.is_none() {
                anyhow::bail!("SUPABASE_ANON_KEY environment variable not set");
            }
        }

        Ok(())
    }

    /// Read the community board seed, or an empty board when none is configured
    pub fn load_community_board(&self) -> anyhow::Result<CommunityBoard> {
        let Some(path) = &self.community_file else {
            return Ok(CommunityBoard::default());
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let board = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid community file {}: {}", path.display(), e))?;

        Ok(board)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
