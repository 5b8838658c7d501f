//! Common test utilities for bagging integration tests.
#![allow(dead_code)]

use bagging_rust::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;

/// Seeded generator used across the integration tests
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Create test features uniformly distributed in [-5, 5)
pub fn create_test_features(num_samples: usize, num_features: usize) -> Array2<f64> {
    let mut rng = test_rng();
    Array2::from_shape_fn((num_samples, num_features), |_| rng.gen_range(-5.0..5.0))
}

/// Create linear test targets with per-feature weights 0.1, 0.2, ...
pub fn create_test_targets(features: &Array2<f64>) -> Array1<f64> {
    let weights = Array1::from_shape_fn(features.ncols(), |j| (j + 1) as f64 * 0.1);
    features.dot(&weights)
}

/// Linear regression dataset
pub fn create_regression_dataset(num_samples: usize, num_features: usize) -> Dataset {
    let features = create_test_features(num_samples, num_features);
    let targets = create_test_targets(&features);
    Dataset::new(features, targets).unwrap()
}

/// Dataset where sample i has input i+1 and target `2 * (i+1)`
pub fn create_doubling_dataset(num_samples: usize) -> Dataset {
    let features = Array2::from_shape_fn((num_samples, 1), |(i, _)| (i + 1) as f64);
    let targets = Array1::from_shape_fn(num_samples, |i| 2.0 * (i + 1) as f64);
    Dataset::new(features, targets).unwrap()
}

/// Non-linear dataset: y = sin(x0) + 0.5 * x1 plus uniform noise
pub fn create_nonlinear_dataset(num_samples: usize, noise: f64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(7);
    let features = Array2::from_shape_fn((num_samples, 2), |_| rng.gen_range(-3.0f64..3.0));
    let targets = Array1::from_shape_fn(num_samples, |i| {
        features[[i, 0]].sin() + 0.5 * features[[i, 1]] + rng.gen_range(-noise..=noise)
    });
    Dataset::new(features, targets).unwrap()
}

/// Learner that always fails to fit
#[derive(Debug, Default)]
pub struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn fit(
        &mut self,
        _features: &ndarray::ArrayView2<'_, Feature>,
        _targets: &ndarray::ArrayView1<'_, Target>,
    ) -> Result<()> {
        Err(BaggingError::training("intentional failure"))
    }

    fn predict(&self, _features: &ndarray::ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        Err(BaggingError::not_fitted("FailingRegressor"))
    }

    fn name(&self) -> &'static str {
        "failing"
    }

    fn num_features(&self) -> Option<usize> {
        None
    }
}

/// Assert two prediction vectors are element-wise close
pub fn assert_predictions_close(a: &Array1<f64>, b: &Array1<f64>, tolerance: f64) {
    assert_eq!(a.len(), b.len(), "prediction lengths differ");
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x - y).abs() <= tolerance,
            "prediction {} differs: {} vs {}",
            i,
            x,
            y
        );
    }
}
