//! Feature scaling transformers.
//!
//! [`StandardScaler`] centers each column and divides by its population
//! standard deviation. [`MinMaxScaler`] maps each column linearly onto a
//! target range. Both learn their parameters in `fit` and reject matrices
//! whose width differs from the one they were fit on.

use crate::core::error::{BaggingError, Result};
use crate::ensure;
use crate::core::traits::{check_num_features, Transformer};
use crate::core::types::*;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Configuration for [`StandardScaler`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// Subtract the column mean
    pub with_mean: bool,
    /// Divide by the column standard deviation
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Z-score normalization, `z = (x - mean) / std`.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
    mean: Option<Array1<Feature>>,
    scale: Option<Array1<Feature>>,
}

impl StandardScaler {
    /// Create a scaler that centers and scales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    /// Learned column means (zeros when centering is disabled).
    pub fn mean(&self) -> Option<&Array1<Feature>> {
        self.mean.as_ref()
    }

    /// Learned column scales (ones when scaling is disabled).
    pub fn scale(&self) -> Option<&Array1<Feature>> {
        self.scale.as_ref()
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, features: &ArrayView2<'_, Feature>) -> Result<()> {
        let (rows, cols) = features.dim();
        if rows == 0 {
            return Err(BaggingError::training("cannot fit StandardScaler on empty data"));
        }

        let column_mean = features
            .mean_axis(Axis(0))
            .ok_or_else(|| BaggingError::numerical("failed to compute column means"))?;

        let mean = if self.config.with_mean {
            column_mean.clone()
        } else {
            Array1::zeros(cols)
        };

        let scale = if self.config.with_std {
            // population std (ddof = 0); constant columns keep unit scale
            features
                .std_axis(Axis(0), 0.0)
                .mapv(|s| if s == 0.0 { 1.0 } else { s })
        } else {
            Array1::ones(cols)
        };

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(())
    }

    fn transform(&self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(BaggingError::not_fitted("StandardScaler")),
        };
        check_num_features(mean.len(), features)?;

        Ok((features - mean) / scale)
    }

    fn name(&self) -> &'static str {
        "standard_scaler"
    }
}

/// Linear rescaling of each column onto `[range.0, range.1]`.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    range: (Feature, Feature),
    data_min: Option<Array1<Feature>>,
    data_range: Option<Array1<Feature>>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self {
            range: (0.0, 1.0),
            data_min: None,
            data_range: None,
        }
    }
}

impl MinMaxScaler {
    /// Create a scaler onto `[0, 1]`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output range. `min` must be strictly below `max`.
    pub fn with_range(mut self, min: Feature, max: Feature) -> Result<Self> {
        ensure!(
            min < max,
            BaggingError::invalid_parameter(
                "feature_range",
                format!("({}, {})", min, max),
                "minimum must be strictly less than maximum",
            )
        );
        self.range = (min, max);
        Ok(self)
    }

    /// Output range.
    pub fn range(&self) -> (Feature, Feature) {
        self.range
    }
}

impl Transformer for MinMaxScaler {
    fn fit(&mut self, features: &ArrayView2<'_, Feature>) -> Result<()> {
        if features.nrows() == 0 {
            return Err(BaggingError::training("cannot fit MinMaxScaler on empty data"));
        }

        let data_min = features.fold_axis(Axis(0), Feature::INFINITY, |&acc, &v| acc.min(v));
        let data_max = features.fold_axis(Axis(0), Feature::NEG_INFINITY, |&acc, &v| acc.max(v));

        self.data_range = Some(&data_max - &data_min);
        self.data_min = Some(data_min);
        Ok(())
    }

    fn transform(&self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        let (data_min, data_range) = match (&self.data_min, &self.data_range) {
            (Some(min), Some(range)) => (min, range),
            _ => return Err(BaggingError::not_fitted("MinMaxScaler")),
        };
        check_num_features(data_min.len(), features)?;

        let (lo, hi) = self.range;
        let mut out = features.to_owned();
        for mut row in out.axis_iter_mut(Axis(0)) {
            for (j, v) in row.iter_mut().enumerate() {
                let span = data_range[j];
                *v = if span == 0.0 {
                    lo
                } else {
                    lo + (*v - data_min[j]) / span * (hi - lo)
                };
            }
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "min_max_scaler"
    }
}
