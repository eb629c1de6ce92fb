use super::schema::ParleyConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./parley.yaml
    /// 2. ~/.parley/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<ParleyConfig, ConfigError> {
        let local_config = PathBuf::from("./parley.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".parley").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(ParleyConfig::default())
    }

    /// Read, parse and validate a single YAML file. Missing keys take their
    /// defaults; out-of-range values are rejected rather than clamped.
    pub async fn load_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: ParleyConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(
            "History {} (limit {}), shell timeout {}s",
            if config.history.enabled { "on" } else { "off" },
            config.history.limit,
            config.shell.timeout_secs
        );
        Ok(config)
    }
}
