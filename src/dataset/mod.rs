//! Dataset management: the immutable in-memory [`Dataset`] and its summary
//! statistics.

pub mod dataset;

pub use dataset::Dataset;

use serde::{Deserialize, Serialize};

/// Summary statistics for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    /// Number of samples
    pub num_samples: usize,
    /// Number of features
    pub num_features: usize,
    /// Per-feature statistics
    pub feature_stats: Vec<FeatureStatistics>,
    /// Target statistics
    pub target_stats: FeatureStatistics,
}

/// Statistics of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatistics {
    /// Smallest value
    pub min_value: f64,
    /// Largest value
    pub max_value: f64,
    /// Arithmetic mean
    pub mean_value: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl FeatureStatistics {
    /// Compute statistics over a non-empty sequence of values.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for v in values {
            count += 1;
            min_value = min_value.min(v);
            max_value = max_value.max(v);
            sum += v;
            sum_sq += v * v;
        }

        if count == 0 {
            return FeatureStatistics {
                min_value: 0.0,
                max_value: 0.0,
                mean_value: 0.0,
                std_dev: 0.0,
            };
        }

        let n = count as f64;
        let mean_value = sum / n;
        let variance = (sum_sq / n - mean_value * mean_value).max(0.0);

        FeatureStatistics {
            min_value,
            max_value,
            mean_value,
            std_dev: variance.sqrt(),
        }
    }
}
