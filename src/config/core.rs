//! Ensemble configuration and its builder.

use crate::config::learner::LearnerConfig;
use crate::config_error;
use crate::core::constants::*;
use crate::core::error::{BaggingError, Result};
use crate::core::types::LearnerKind;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Settings for building a bagged ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaggingConfig {
    /// Number of ensemble members (B)
    pub n_estimators: usize,
    /// Seed used by the seeded entry points
    pub random_seed: u64,
    /// Compute an out-of-bag score while building
    pub oob_score: bool,
    /// Fit members on a thread pool
    pub parallel: bool,
    /// Thread pool size for parallel building (0 = all cores)
    pub num_threads: usize,
    /// Base learner settings
    pub learner: LearnerConfig,
}

impl Default for BaggingConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            random_seed: DEFAULT_RANDOM_SEED,
            oob_score: false,
            parallel: false,
            num_threads: DEFAULT_NUM_THREADS,
            learner: LearnerConfig::default(),
        }
    }
}

impl BaggingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(BaggingError::invalid_parameter(
                "n_estimators",
                "0",
                "ensemble must have at least one member",
            ));
        }
        self.learner.validate()
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error!("Failed to read config file: {}", e))?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| config_error!("Failed to parse JSON config: {}", e))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| config_error!("Failed to parse TOML config: {}", e))?,
            _ => {
                return Err(config_error!(
                    "Unsupported config file format. Use .json or .toml"
                ))
            }
        };

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| config_error!("Failed to serialize to JSON: {}", e))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| config_error!("Failed to serialize to TOML: {}", e))?,
            _ => {
                return Err(config_error!(
                    "Unsupported config file format. Use .json or .toml"
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| config_error!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Default configuration with `BAGGING_*` environment overrides applied
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Self::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Override fields for which a `BAGGING_*` environment variable is set
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Some(v) = env_value("BAGGING_N_ESTIMATORS")? {
            self.n_estimators = v;
        }
        if let Some(v) = env_value("BAGGING_RANDOM_SEED")? {
            self.random_seed = v;
        }
        if let Some(v) = env_value("BAGGING_OOB_SCORE")? {
            self.oob_score = v;
        }
        if let Some(v) = env_value("BAGGING_PARALLEL")? {
            self.parallel = v;
        }
        if let Some(v) = env_value("BAGGING_NUM_THREADS")? {
            self.num_threads = v;
        }
        if let Some(v) = env_value::<LearnerKind>("BAGGING_LEARNER")? {
            self.learner.kind = v;
        }

        self.validate()
    }

    /// Get the effective number of threads (0 means use all available cores)
    pub fn effective_num_threads(&self) -> usize {
        let available = num_cpus::get();
        if self.num_threads == 0 {
            available
        } else {
            if self.num_threads > available {
                log::warn!(
                    "num_threads = {} exceeds the {} available cores",
                    self.num_threads,
                    available
                );
            }
            self.num_threads
        }
    }
}

fn env_value<T: FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error!("Invalid {}: '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: BaggingConfig,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: BaggingConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the ensemble size
    pub fn n_estimators(mut self, n: usize) -> Self {
        if n == 0 {
            self.validation_errors
                .push("n_estimators must be at least 1".to_string());
        }
        self.config.n_estimators = n;
        self
    }

    /// Set the random seed
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Enable out-of-bag scoring
    pub fn oob_score(mut self, enabled: bool) -> Self {
        self.config.oob_score = enabled;
        self
    }

    /// Enable parallel building
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    /// Set the number of threads
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = threads;
        self
    }

    /// Replace the base learner settings
    pub fn learner(mut self, learner: LearnerConfig) -> Self {
        self.config.learner = learner;
        self
    }

    /// Set the base learner kind
    pub fn learner_kind(mut self, kind: LearnerKind) -> Self {
        self.config.learner.kind = kind;
        self
    }

    /// Limit tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth == 0 {
            self.validation_errors
                .push("max_depth must be at least 1".to_string());
        }
        self.config.learner.tree.max_depth = Some(depth);
        self
    }

    /// Set the ridge penalty for linear learners
    pub fn alpha(mut self, alpha: f64) -> Self {
        if !(alpha.is_finite() && alpha >= 0.0) {
            self.validation_errors
                .push("alpha must be a finite value >= 0".to_string());
        }
        self.config.learner.alpha = alpha;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BaggingConfig> {
        if !self.validation_errors.is_empty() {
            return Err(config_error!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            ));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
