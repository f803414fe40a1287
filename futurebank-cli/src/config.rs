//! Configuration module
//!
//! Handles CLI configuration: server URL and the local state file.

use std::path::PathBuf;

use anyhow::Result;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the FutureBank server
    pub server_url: String,

    /// JSON file holding the session and cached dashboard
    pub state_file: PathBuf,
}

impl Config {
    /// Build the configuration, defaulting the state file to
    /// `~/.futurebank/state.json`
    pub fn new(server_url: String, state_file: Option<PathBuf>) -> Result<Self> {
        let state_file = match state_file {
            Some(path) => path,
            None => default_state_file()?,
        };

        Ok(Self {
            server_url,
            state_file,
        })
    }
}

fn default_state_file() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory; use --state-file"))?;
    Ok(home.join(".futurebank").join("state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_state_file_wins() {
        let config = Config::new(
            "http://localhost:8080".to_string(),
            Some(PathBuf::from("/tmp/fb.json")),
        )
        .unwrap();
        assert_eq!(config.state_file, PathBuf::from("/tmp/fb.json"));
    }
}
