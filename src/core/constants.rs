//! Default values used across the library.

/// Default number of ensemble members.
pub const DEFAULT_N_ESTIMATORS: usize = 10;

/// Default random seed for reproducibility.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Default number of threads for parallel building.
/// 0 means use all available cores.
pub const DEFAULT_NUM_THREADS: usize = 0;

/// Default minimum number of samples required to split a tree node.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

/// Default minimum number of samples in a tree leaf.
pub const DEFAULT_MIN_SAMPLES_LEAF: usize = 1;

/// Default ridge penalty for linear learners.
pub const DEFAULT_RIDGE_ALPHA: f64 = 0.0;

/// Pivot magnitude below which a linear system is treated as singular.
pub const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-10;

/// Default number of cross-validation folds.
pub const DEFAULT_NUM_FOLDS: usize = 5;

/// Expected fraction of distinct samples in a large bootstrap sample, 1 - 1/e.
pub const EXPECTED_UNIQUE_FRACTION: f64 = 0.632_120_558_828_557_7;
