//! Configuration for ensembles and their base learners.
//!
//! [`BaggingConfig`] is serializable to TOML and JSON and can be overridden
//! from `BAGGING_*` environment variables. [`LearnerConfig`] describes the
//! base learner and doubles as a learner factory.

pub mod core;
pub mod learner;

pub use self::core::{BaggingConfig, ConfigBuilder};
pub use learner::LearnerConfig;

/// Conventional configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "bagging.toml";
