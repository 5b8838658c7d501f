//! # bagging-rust
//!
//! Bootstrap aggregation ("bagging") for regression.
//!
//! An ensemble is built by drawing `B` bootstrap samples from a training set,
//! each the same size as the original and drawn uniformly with replacement,
//! fitting one fresh base learner per sample and averaging the members'
//! predictions. Any model implementing [`Regressor`] can be bagged; the crate
//! ships a constant-mean model, a CART regression tree, a linear/ridge model
//! and a preprocessing [`Pipeline`](learners::Pipeline).
//!
//! ## Quick Start
//!
//! ```rust
//! use bagging_rust::{BaggingConfig, BaggingRegressor, Dataset, DecisionTreeRegressor};
//! use ndarray::{Array1, Array2};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> bagging_rust::Result<()> {
//! let features = Array2::from_shape_fn((40, 1), |(i, _)| i as f64 / 4.0);
//! let targets = features.column(0).mapv(f64::sin);
//! let dataset = Dataset::new(features, targets)?;
//!
//! let config = BaggingConfig {
//!     n_estimators: 20,
//!     ..BaggingConfig::default()
//! };
//! let regressor = BaggingRegressor::new(|| DecisionTreeRegressor::new().with_max_depth(4), config);
//! let ensemble = regressor.fit(&dataset, &mut StdRng::seed_from_u64(42))?;
//!
//! let query = Array2::from_shape_vec((2, 1), vec![1.0, 5.5]).unwrap();
//! let predictions: Array1<f64> = ensemble.predict(&query.view())?;
//! assert_eq!(predictions.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: error type, numeric aliases, defaults and the learner traits
//! - [`config`]: ensemble and learner configuration (TOML/JSON/environment)
//! - [`dataset`]: validated feature matrix plus target vector
//! - [`sampling`]: bootstrap sampling
//! - [`ensemble`]: the bagging builder, fitted ensemble and OOB scoring
//! - [`learners`]: base learners
//! - [`preprocessing`]: feature scalers
//! - [`metrics`]: regression metrics
//! - [`model_selection`]: train/test split and k-fold cross-validation
//!
//! Randomness is always passed in explicitly as a [`rand::Rng`], so a seeded
//! generator makes every build reproducible.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

pub mod config;
pub mod core;
pub mod dataset;
pub mod ensemble;
pub mod learners;
pub mod metrics;
pub mod model_selection;
pub mod preprocessing;
pub mod sampling;

pub use crate::core::{
    constants::*,
    error::{BaggingError, Result},
    traits::{LearnerFactory, Regressor, Transformer},
    types::*,
};

pub use config::{BaggingConfig, ConfigBuilder, LearnerConfig};
pub use dataset::{Dataset, DatasetStatistics, FeatureStatistics};
pub use ensemble::{build_ensemble, BaggedEnsemble, BaggingRegressor, OobScore};
pub use learners::{
    DecisionTreeConfig, DecisionTreeRegressor, LinearRegression, MeanRegressor, Pipeline,
};
pub use metrics::{
    evaluate_regression, mean_absolute_error, mean_squared_error, r2_score,
    root_mean_squared_error, RegressionMetrics,
};
pub use model_selection::{cross_validate, train_test_split, CrossValidationResult, KFold};
pub use preprocessing::{MinMaxScaler, StandardScaler, StandardScalerConfig};
pub use sampling::{bootstrap_sample, BootstrapSample, BootstrapSampler};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the library.
///
/// Installs `env_logger` with an `info` default filter (`RUST_LOG`
/// overrides it). Safe to call repeatedly.
///
/// ```rust
/// bagging_rust::init();
/// ```
pub fn init() {
    core::initialize_logging();
}
