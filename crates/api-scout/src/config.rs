//! Discovery configuration loading and resolution.
//!
//! A [`DiscoveryConfig`] is built once by the caller and passed by reference
//! to every component. There is no process-wide default state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{ScoutError, ScoutResult};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "API_SCOUT_CONFIG";

/// Config file picked up from the working directory when nothing else is given.
pub const LOCAL_CONFIG_FILE: &str = ".api-scout.json";

/// Action literals tried by the behavior prober, in order.
pub const DEFAULT_CANDIDATE_ACTIONS: [&str; 4] = ["send_otp", "verify_otp", "init", "update"];

/// Tunables for one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Schema discovery round budget.
    pub max_rounds: usize,
    /// Quoted tokens shorter than this are not treated as field names.
    pub min_token_len: usize,
    /// Literals injected into each field to find a workflow controller.
    pub candidate_actions: Vec<String>,
    /// User-Agent header sent with every probe.
    pub user_agent: String,
    /// Run the action trials for a single field concurrently.
    pub parallel_trials: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_rounds: 5,
            min_token_len: 2,
            candidate_actions: DEFAULT_CANDIDATE_ACTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            user_agent: "Mozilla/5.0".to_string(),
            parallel_trials: false,
        }
    }
}

impl DiscoveryConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ScoutResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the resolved config path, or fall back to defaults.
    pub fn load(explicit: Option<&str>) -> ScoutResult<Self> {
        match resolve_config_path(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading discovery config");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would make discovery meaningless.
    pub fn validate(&self) -> ScoutResult<()> {
        if self.max_rounds == 0 {
            return Err(ScoutError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ScoutError::InvalidConfig(
                "timeout_ms must be at least 1".to_string(),
            ));
        }
        if self.candidate_actions.is_empty() {
            return Err(ScoutError::InvalidConfig(
                "candidate_actions must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config file path: explicit, then env var, then local file.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    None
}
