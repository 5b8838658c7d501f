//! Core data types for the bagging library.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input feature value type.
pub type Feature = f64;

/// Regression target type.
pub type Target = f64;

/// Prediction value type produced by learners and ensembles.
pub type Prediction = f64;

/// Index of a sample in a dataset.
pub type SampleIndex = usize;

/// Index of a feature column.
pub type FeatureIndex = usize;

/// Kind of base learner that a configuration can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerKind {
    /// Constant model predicting the mean training target
    Mean,
    /// CART regression tree
    DecisionTree,
    /// Least squares / ridge linear model
    Linear,
    /// Standard scaling followed by a linear model
    ScaledLinear,
}

impl Default for LearnerKind {
    fn default() -> Self {
        LearnerKind::DecisionTree
    }
}

impl fmt::Display for LearnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearnerKind::Mean => write!(f, "mean"),
            LearnerKind::DecisionTree => write!(f, "decision_tree"),
            LearnerKind::Linear => write!(f, "linear"),
            LearnerKind::ScaledLinear => write!(f, "scaled_linear"),
        }
    }
}

impl std::str::FromStr for LearnerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(LearnerKind::Mean),
            "decision_tree" | "tree" => Ok(LearnerKind::DecisionTree),
            "linear" => Ok(LearnerKind::Linear),
            "scaled_linear" => Ok(LearnerKind::ScaledLinear),
            other => Err(format!("unknown learner kind '{}'", other)),
        }
    }
}
