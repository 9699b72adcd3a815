// src/config.rs

//! Defines the configuration structures for `flapboard`.
//!
//! The configuration is deserialized from a TOML file. Every section has sensible
//! defaults, so an empty (or missing) file yields a working setup. Secrets are
//! never read from the file: the board key and the write-retry switch come from
//! the environment.

use crate::layout::tasks::{default_categories, TaskCategory};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FLAPBOARD_CONFIG";
/// Environment variable holding the board's read-write key.
pub const RW_KEY_ENV: &str = "VESTABOARD_RW_KEY";
/// Environment variable that allows retrying non-idempotent requests.
pub const RETRY_WRITES_ENV: &str = "FLAPBOARD_RETRY_WRITES";

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)] // Missing sections fall back to their defaults.
pub struct Config {
    /// Board endpoint settings.
    pub board: BoardConfig,
    /// Transport retry settings.
    pub retry: RetryConfig,
    /// Task list categories.
    pub tasks: TasksConfig,
}

// --- Board Configuration ---

/// Where and how to reach the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Base URL of the read-write API.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            base_url: "https://rw.vestaboard.com/".to_string(),
            timeout_ms: 5_000,
        }
    }
}

// --- Retry Configuration ---

/// Backoff schedule for transport calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before each retry, in milliseconds. One retry per entry.
    pub backoff_ms: Vec<u64>,
    /// Shortest time any content stays on the board. Retries must finish well inside it.
    pub min_display_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            backoff_ms: vec![1_000, 2_000, 4_000],
            min_display_secs: 60,
        }
    }
}

impl RetryConfig {
    /// The schedule as durations.
    pub fn backoff(&self) -> Vec<Duration> {
        self.backoff_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .collect()
    }

    /// Worst-case time spent waiting between attempts.
    pub fn total_backoff(&self) -> Duration {
        self.backoff().into_iter().sum()
    }
}

// --- Tasks Configuration ---

/// Task list categories, in match priority order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TasksConfig {
    pub categories: Vec<TaskCategory>,
}

impl Default for TasksConfig {
    fn default() -> Self {
        TasksConfig {
            categories: default_categories(),
        }
    }
}

// --- Loading ---

impl Config {
    /// Parses a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("Invalid TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from `path`, or from `$FLAPBOARD_CONFIG`, or returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        let Some(path) = path else {
            info!("No configuration file given, using defaults.");
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        debug!("{:?}", config);
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// The retry schedule must finish before the next content change could start,
    /// so a retrying write never overlaps the following job.
    pub fn validate(&self) -> Result<()> {
        let budget = Duration::from_secs(self.retry.min_display_secs);
        let total = self.worst_case_call_time();
        if total >= budget {
            bail!(
                "retries can take {:?}, which is not below the minimum display time of {:?}",
                total,
                budget
            );
        }
        if self.board.timeout_ms == 0 {
            bail!("board.timeout_ms must be positive");
        }
        if self.tasks.categories.iter().any(|c| c.keyword.is_empty()) {
            bail!("task category keywords must not be empty");
        }
        Ok(())
    }

    /// Longest a retried call can take: every attempt timing out plus every backoff.
    pub fn worst_case_call_time(&self) -> Duration {
        let attempts = self.retry.backoff_ms.len() as u32 + 1;
        Duration::from_millis(self.board.timeout_ms) * attempts + self.retry.total_backoff()
    }
}

/// Reads the board key from the environment.
pub fn rw_key_from_env() -> Result<String> {
    std::env::var(RW_KEY_ENV).with_context(|| format!("{} is not set", RW_KEY_ENV))
}

/// Whether `$FLAPBOARD_RETRY_WRITES` authorizes retrying non-idempotent calls.
pub fn retry_writes_from_env() -> bool {
    std::env::var(RETRY_WRITES_ENV)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests;
