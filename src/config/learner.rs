//! Serializable description of a base learner.

use crate::core::constants::DEFAULT_RIDGE_ALPHA;
use crate::core::error::{BaggingError, Result};
use crate::core::traits::{LearnerFactory, Regressor};
use crate::core::types::LearnerKind;
use crate::learners::{DecisionTreeConfig, DecisionTreeRegressor, LinearRegression, MeanRegressor, Pipeline};
use crate::preprocessing::StandardScaler;

use serde::{Deserialize, Serialize};

/// Base learner settings. Acts as a [`LearnerFactory`] producing boxed
/// learners, so a whole ensemble can be described in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Which learner to build
    pub kind: LearnerKind,
    /// Ridge penalty for linear learners
    pub alpha: f64,
    /// Whether linear learners fit an intercept
    pub fit_intercept: bool,
    /// Tree hyperparameters
    pub tree: DecisionTreeConfig,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            kind: LearnerKind::default(),
            alpha: DEFAULT_RIDGE_ALPHA,
            fit_intercept: true,
            tree: DecisionTreeConfig::default(),
        }
    }
}

impl LearnerConfig {
    /// Default settings for the given learner kind.
    pub fn new(kind: LearnerKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Validate learner hyperparameters.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            LearnerKind::Mean => Ok(()),
            LearnerKind::DecisionTree => self.tree.validate(),
            LearnerKind::Linear | LearnerKind::ScaledLinear => {
                if !(self.alpha.is_finite() && self.alpha >= 0.0) {
                    return Err(BaggingError::invalid_parameter(
                        "alpha",
                        self.alpha.to_string(),
                        "must be a finite value >= 0",
                    ));
                }
                Ok(())
            }
        }
    }

    fn linear(&self) -> LinearRegression {
        LinearRegression::new()
            .with_alpha(self.alpha)
            .with_fit_intercept(self.fit_intercept)
    }
}

impl LearnerFactory for LearnerConfig {
    type Learner = Box<dyn Regressor>;

    fn create(&self) -> Box<dyn Regressor> {
        match self.kind {
            LearnerKind::Mean => Box::new(MeanRegressor::new()),
            LearnerKind::DecisionTree => Box::new(DecisionTreeRegressor::with_config(self.tree)),
            LearnerKind::Linear => Box::new(self.linear()),
            LearnerKind::ScaledLinear => {
                Box::new(Pipeline::new(self.linear()).with_step(StandardScaler::new()))
            }
        }
    }
}
