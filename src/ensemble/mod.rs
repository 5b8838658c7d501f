//! Bagged ensembles: the builder, the fitted predictor and out-of-bag scoring.

pub mod bagging;
pub mod oob;

pub use bagging::{build_ensemble, BaggedEnsemble, BaggingRegressor};
pub use oob::OobScore;
