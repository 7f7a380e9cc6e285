//! Advisory gateway configuration.
//!
//! An explicit struct handed to the gateway constructor: feature toggles,
//! retry bounds, and timeouts live here, never in process-wide mutable
//! state. Loaded from `scolaris.toml` when present, with `${VAR}`
//! references resolved from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the advisory gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Base URL of the recommendation service.
    #[serde(default = "default_recommendation_url")]
    pub recommendation_url: String,
    /// Base URL of the schedule service.
    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,
    /// When false, recommendation calls return the fallback without I/O.
    #[serde(default = "default_true")]
    pub recommendation_enabled: bool,
    /// When false, schedule calls return the fallback without I/O.
    #[serde(default = "default_true")]
    pub schedule_enabled: bool,
    /// Attempts per call, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Overall per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment deadline in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_recommendation_url() -> String {
    "http://localhost:5001".to_string()
}
fn default_schedule_url() -> String {
    "http://localhost:5002".to_string()
}
fn default_true() -> bool {
    true
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            recommendation_url: default_recommendation_url(),
            schedule_url: default_schedule_url(),
            recommendation_enabled: true,
            schedule_enabled: true,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl AdvisoryConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. the explicit path, if given (must exist)
/// 2. `scolaris.toml` in the current directory
/// 3. built-in defaults
pub fn load_config_from(path: Option<&Path>) -> Result<AdvisoryConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("scolaris.toml");
        local.exists().then_some(local)
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AdvisoryConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AdvisoryConfig::default(),
    };

    config.recommendation_url = resolve_env_vars(&config.recommendation_url);
    config.schedule_url = resolve_env_vars(&config.schedule_url);

    Ok(config)
}
