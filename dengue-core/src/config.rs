use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    client::{ClientConfig, DEFAULT_ENDPOINT},
    model::Horizon,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// endpoint = "http://127.0.0.1:5010"
/// default_horizon = "3"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the prediction service.
    pub endpoint: Option<String>,

    /// Horizon preselected in the form, one of "1", "3", "5".
    pub default_horizon: Option<String>,

    /// Request timeout; absent means no client-side limit.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Stored default horizon, or one day when none is set.
    pub fn default_horizon(&self) -> Result<Horizon> {
        match self.default_horizon.as_deref() {
            None => Ok(Horizon::default()),
            Some(s) => s.parse().with_context(|| {
                "Stored default horizon is invalid.\n\
                 Hint: run `dengue configure` to pick 1, 3 or 5 days."
                    .to_string()
            }),
        }
    }

    pub fn set_default_horizon(&mut self, horizon: Horizon) {
        self.default_horizon = Some(horizon.as_str().to_string());
    }

    /// Effective client settings; `endpoint_override` (from the command line) wins.
    pub fn client_config(&self, endpoint_override: Option<&str>) -> ClientConfig {
        let endpoint = endpoint_override
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string();

        ClientConfig { endpoint, timeout: self.timeout_secs.map(Duration::from_secs) }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where the terminal UI writes its log files.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().join("logs"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "dengue-risk", "dengue-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}
