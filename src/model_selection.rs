//! Train/test splitting and k-fold cross-validation.

use crate::core::constants::{DEFAULT_NUM_FOLDS, DEFAULT_RANDOM_SEED};
use crate::core::error::{BaggingError, Result};
use crate::core::traits::{LearnerFactory, Regressor};
use crate::core::types::SampleIndex;
use crate::dataset::Dataset;
use crate::metrics::{evaluate_regression, RegressionMetrics};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Shuffle `dataset` and split it into `(train, test)`.
///
/// The test part receives `ceil(n * test_fraction)` samples; both parts must
/// end up non-empty.
pub fn train_test_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    test_fraction: f64,
    rng: &mut R,
) -> Result<(Dataset, Dataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(BaggingError::invalid_parameter(
            "test_fraction",
            test_fraction.to_string(),
            "must be in range (0.0, 1.0)",
        ));
    }

    let n = dataset.num_data();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(BaggingError::invalid_parameter(
            "test_fraction",
            test_fraction.to_string(),
            format!("leaves an empty split for {} samples", n),
        ));
    }

    let mut indices: Vec<SampleIndex> = (0..n).collect();
    indices.shuffle(rng);
    let (test, train) = indices.split_at(n_test);
    Ok((dataset.subset(train)?, dataset.subset(test)?))
}

/// K-fold cross-validation splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFold {
    /// Number of folds
    pub num_folds: usize,
    /// Whether to shuffle data before splitting
    pub shuffle: bool,
    /// Seed for the shuffle
    pub random_seed: u64,
}

impl Default for KFold {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_FOLDS)
    }
}

impl KFold {
    /// Unshuffled splitter with `num_folds` folds.
    pub fn new(num_folds: usize) -> Self {
        Self {
            num_folds,
            shuffle: false,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }

    /// Set whether to shuffle data
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Produce `(train, test)` index sets.
    ///
    /// Every index appears in exactly one test set. The first `n % k` folds
    /// are one sample larger than the rest.
    pub fn split(&self, num_samples: usize) -> Result<Vec<(Vec<SampleIndex>, Vec<SampleIndex>)>> {
        if self.num_folds < 2 {
            return Err(BaggingError::invalid_parameter(
                "num_folds",
                self.num_folds.to_string(),
                "must be at least 2",
            ));
        }
        if num_samples < self.num_folds {
            return Err(BaggingError::invalid_parameter(
                "num_folds",
                self.num_folds.to_string(),
                format!("cannot exceed the number of samples ({})", num_samples),
            ));
        }

        let mut indices: Vec<SampleIndex> = (0..num_samples).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.random_seed);
            indices.shuffle(&mut rng);
        }

        let base = num_samples / self.num_folds;
        let extra = num_samples % self.num_folds;
        let mut folds = Vec::with_capacity(self.num_folds);
        let mut start = 0;
        for fold in 0..self.num_folds {
            let size = base + usize::from(fold < extra);
            let end = start + size;
            let test = indices[start..end].to_vec();
            let train = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();
            folds.push((train, test));
            start = end;
        }
        Ok(folds)
    }
}

/// Per-fold and aggregated cross-validation metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Number of folds used
    pub num_folds: usize,
    /// Metrics of each fold, in fold order
    pub folds: Vec<RegressionMetrics>,
    /// Mean of each metric across folds
    pub mean: RegressionMetrics,
    /// Population standard deviation of each metric across folds
    pub std: RegressionMetrics,
}

/// Fit a fresh learner per fold and evaluate it on the held-out fold.
pub fn cross_validate<F: LearnerFactory>(
    factory: &F,
    dataset: &Dataset,
    kfold: &KFold,
) -> Result<CrossValidationResult> {
    let splits = kfold.split(dataset.num_data())?;
    let mut folds = Vec::with_capacity(splits.len());

    for (fold, (train, test)) in splits.iter().enumerate() {
        let (train_x, train_y) = dataset.select(train)?;
        let (test_x, test_y) = dataset.select(test)?;

        let mut learner = factory.create();
        learner.fit(&train_x.view(), &train_y.view())?;
        let predictions = learner.predict(&test_x.view())?;
        let metrics = evaluate_regression(&test_y.view(), &predictions.view())?;

        log::debug!(
            "Fold {}: mse = {:.6}, r2 = {:.4}",
            fold,
            metrics.mse,
            metrics.r2
        );
        folds.push(metrics);
    }

    let mean = aggregate(&folds, |values| values.iter().sum::<f64>() / values.len() as f64);
    let std = aggregate(&folds, |values| {
        let m = values.iter().sum::<f64>() / values.len() as f64;
        (values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64).sqrt()
    });

    log::info!(
        "Cross-validation over {} folds: mse = {:.6} +/- {:.6}",
        folds.len(),
        mean.mse,
        std.mse
    );

    Ok(CrossValidationResult {
        num_folds: folds.len(),
        folds,
        mean,
        std,
    })
}

fn aggregate(folds: &[RegressionMetrics], reduce: impl Fn(&[f64]) -> f64) -> RegressionMetrics {
    let collect = |get: fn(&RegressionMetrics) -> f64| -> Vec<f64> { folds.iter().map(get).collect() };
    RegressionMetrics {
        mse: reduce(&collect(|m| m.mse)),
        rmse: reduce(&collect(|m| m.rmse)),
        mae: reduce(&collect(|m| m.mae)),
        r2: reduce(&collect(|m| m.r2)),
    }
}
