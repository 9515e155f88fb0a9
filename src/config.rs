// Configuration module for reading Agent.toml
// This module provides OOP-style configuration management for the Isolation agent

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub heuristic: HeuristicConfig,
    pub debug: DebugConfig,
}

/// Per-turn time budget used by the turn driver
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub time_limit_ms: u64,
    pub overhead_ms: u64,
    pub polling_interval_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.time_limit_ms.saturating_sub(self.overhead_ms)
    }
}

/// Iterative deepening limits
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub initial_depth: u32,
    /// Safety cap on depth; iterations beyond it are never started
    pub max_search_depth: u32,
    /// Seed for the tie-breaking RNG. Omit for an entropy seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Weights of the positional heuristic
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicConfig {
    pub distance_weight: f64,
    pub boundary_weight: f64,
}

/// Match log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Agent.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Agent.toml in the project root
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file("Agent.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                time_limit_ms: 150,
                overhead_ms: 10,
                polling_interval_ms: 5,
            },
            search: SearchConfig {
                initial_depth: 1,
                max_search_depth: 100,
                seed: None,
            },
            heuristic: HeuristicConfig {
                distance_weight: 1.5,
                boundary_weight: 1.5,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "isolation_match.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Agent.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.initial_depth == 0 {
            return Err(ConfigError::Invalid("search.initial_depth must be at least 1".into()));
        }
        if self.search.max_search_depth < self.search.initial_depth {
            return Err(ConfigError::Invalid(
                "search.max_search_depth must not be below search.initial_depth".into(),
            ));
        }
        if self.timing.polling_interval_ms == 0 {
            return Err(ConfigError::Invalid("timing.polling_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
