//! Constant baseline learner.

use crate::core::error::{BaggingError, Result};
use crate::core::traits::{check_fit_inputs, check_num_features, Regressor};
use crate::core::types::*;

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Predicts the mean target of its training data for every input.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    mean: Option<Prediction>,
    num_features: Option<usize>,
}

impl MeanRegressor {
    /// Create an unfitted regressor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The learned constant.
    pub fn value(&self) -> Option<Prediction> {
        self.mean
    }
}

impl Regressor for MeanRegressor {
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        check_fit_inputs(features, targets)?;
        self.mean = targets.mean();
        self.num_features = Some(features.ncols());
        Ok(())
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        let (mean, num_features) = match (self.mean, self.num_features) {
            (Some(mean), Some(n)) => (mean, n),
            _ => return Err(BaggingError::not_fitted("MeanRegressor")),
        };
        check_num_features(num_features, features)?;
        Ok(Array1::from_elem(features.nrows(), mean))
    }

    fn name(&self) -> &'static str {
        "mean"
    }

    fn num_features(&self) -> Option<usize> {
        self.num_features
    }
}
