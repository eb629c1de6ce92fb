use super::loader::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted `history.limit`.
pub const MAX_HISTORY_LIMIT: usize = 100_000;
/// Largest accepted `resources.process_limit`.
pub const MAX_PROCESS_LIMIT: usize = 10_000;
/// Largest accepted `resources.name_width`.
pub const MAX_NAME_WIDTH: usize = 256;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
}

impl ParleyConfig {
    /// Check ranges that serde cannot express. Run after every source of
    /// settings (file and command line) has been applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shell.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "shell.timeout_secs must be at least 1".to_string(),
            ));
        }
        check_range("history.limit", self.history.limit, MAX_HISTORY_LIMIT)?;
        check_range(
            "resources.process_limit",
            self.resources.process_limit,
            MAX_PROCESS_LIMIT,
        )?;
        check_range("resources.name_width", self.resources.name_width, MAX_NAME_WIDTH)?;
        Ok(())
    }
}

fn check_range(key: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 1 and {}, got {}",
            key, max, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// History file. Relative paths and the default resolve against the
    /// directory the terminal starts in.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Entries shown by `history`.
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            file: None,
            limit: default_history_limit(),
        }
    }
}

impl HistoryConfig {
    pub const DEFAULT_FILE_NAME: &'static str = "terminal_history.txt";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Interpreter invoked as `<program> -c <command>`. Defaults to `sh`
    /// (`cmd /C` on Windows).
    #[serde(default)]
    pub program: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            program: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    #[serde(default = "default_process_limit")]
    pub process_limit: usize,
    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            process_limit: default_process_limit(),
            name_width: default_name_width(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_process_limit() -> usize {
    50
}

fn default_name_width() -> usize {
    20
}
