//! Runner configuration with YAML loading.

use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Optional pause before each click/input/scroll, in milliseconds.
    /// Zero disables the pause.
    #[serde(default)]
    pub sleep_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Minimum `score / max_possible_score` ratio a live candidate must reach
    /// to count as located.
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sleep_ms: 0,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            confidence_floor: default_confidence_floor(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_confidence_floor() -> f64 {
    0.75
}

impl RunnerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries.max(1),
            delay: Duration::from_millis(self.retry_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./rewind.yaml
    /// 2. ~/.rewind/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<RunnerConfig, ConfigError> {
        let local_config = PathBuf::from("./rewind.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".rewind").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(RunnerConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<RunnerConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: RunnerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
