//! CART regression tree.
//!
//! Nodes are split greedily on the feature/threshold pair that most reduces
//! the sum of squared errors. Candidate thresholds are midpoints between
//! consecutive distinct values of a feature, and each leaf predicts the mean
//! target of the samples that reach it.

use crate::core::constants::*;
use crate::core::error::{BaggingError, Result};
use crate::core::traits::{check_fit_inputs, check_num_features, Regressor};
use crate::core::types::*;

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Minimum SSE reduction for a split to be taken.
const MIN_SPLIT_GAIN: f64 = 1e-12;

/// Decision tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf {
        /// Mean target of the samples in this leaf
        value: Prediction,
        /// Number of training samples in this leaf
        n_samples: usize,
    },
    /// Internal node with split
    Split {
        /// Feature tested at this node
        feature: FeatureIndex,
        /// Samples with `x[feature] <= threshold` go left
        threshold: Feature,
        /// Left child
        left: Box<TreeNode>,
        /// Right child
        right: Box<TreeNode>,
        /// Number of training samples reaching this node
        n_samples: usize,
    },
}

impl TreeNode {
    fn predict_row(&self, row: &ArrayView1<'_, Feature>) -> Prediction {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn num_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.num_leaves() + right.num_leaves(),
        }
    }
}

/// Hyperparameters for [`DecisionTreeRegressor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionTreeConfig {
    /// Maximum depth (None = grow until leaves are pure or too small)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples required in each leaf
    pub min_samples_leaf: usize,
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            min_samples_leaf: DEFAULT_MIN_SAMPLES_LEAF,
        }
    }
}

impl DecisionTreeConfig {
    /// Validate the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(BaggingError::invalid_parameter(
                    "max_depth",
                    "0",
                    "must be at least 1 when specified",
                ));
            }
        }
        if self.min_samples_split < 2 {
            return Err(BaggingError::invalid_parameter(
                "min_samples_split",
                self.min_samples_split.to_string(),
                "must be at least 2",
            ));
        }
        if self.min_samples_leaf < 1 {
            return Err(BaggingError::invalid_parameter(
                "min_samples_leaf",
                self.min_samples_leaf.to_string(),
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Regression tree using the squared-error criterion.
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeRegressor {
    config: DecisionTreeConfig,
    root: Option<TreeNode>,
    num_features: Option<usize>,
    feature_importances: Option<Array1<f64>>,
}

struct BestSplit {
    feature: FeatureIndex,
    threshold: Feature,
    gain: f64,
}

impl DecisionTreeRegressor {
    /// Create an unfitted tree with default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted tree from a configuration.
    pub fn with_config(config: DecisionTreeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.config.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.config.min_samples_leaf = min_samples;
        self
    }

    /// Hyperparameters.
    pub fn config(&self) -> &DecisionTreeConfig {
        &self.config
    }

    /// Root of the fitted tree.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Depth of the fitted tree (a single leaf has depth 0).
    pub fn depth(&self) -> Option<usize> {
        self.root.as_ref().map(TreeNode::depth)
    }

    /// Number of leaves of the fitted tree.
    pub fn num_leaves(&self) -> Option<usize> {
        self.root.as_ref().map(TreeNode::num_leaves)
    }

    /// Normalized total SSE reduction per feature.
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    fn build(
        &self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
        indices: Vec<SampleIndex>,
        depth: usize,
        importances: &mut [f64],
    ) -> TreeNode {
        let n_samples = indices.len();
        let (sum, sum_sq) = indices.iter().fold((0.0, 0.0), |(s, sq), &i| {
            let y = targets[i];
            (s + y, sq + y * y)
        });
        let value = sum / n_samples as f64;
        let sse = sum_sq - sum * sum / n_samples as f64;

        let should_stop = n_samples < self.config.min_samples_split
            || n_samples < 2 * self.config.min_samples_leaf
            || self.config.max_depth.map_or(false, |d| depth >= d)
            || sse <= MIN_SPLIT_GAIN;

        if should_stop {
            return TreeNode::Leaf { value, n_samples };
        }

        let best = match self.find_best_split(features, targets, &indices, sse) {
            Some(best) => best,
            None => return TreeNode::Leaf { value, n_samples },
        };

        let (left_indices, right_indices): (Vec<SampleIndex>, Vec<SampleIndex>) = indices
            .into_iter()
            .partition(|&i| features[[i, best.feature]] <= best.threshold);
        if left_indices.is_empty() || right_indices.is_empty() {
            return TreeNode::Leaf { value, n_samples };
        }

        importances[best.feature] += best.gain;

        let left = Box::new(self.build(features, targets, left_indices, depth + 1, importances));
        let right = Box::new(self.build(features, targets, right_indices, depth + 1, importances));

        TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
            n_samples,
        }
    }

    fn find_best_split(
        &self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
        indices: &[SampleIndex],
        parent_sse: f64,
    ) -> Option<BestSplit> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf;
        let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

        let mut best: Option<BestSplit> = None;
        let mut pairs: Vec<(Feature, Target)> = Vec::with_capacity(n);

        for feature in 0..features.ncols() {
            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (features[[i, feature]], targets[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for split in 0..n - 1 {
                let (x, y) = pairs[split];
                left_sum += y;
                left_sq += y * y;

                let left_count = split + 1;
                let right_count = n - left_count;
                if left_count < min_leaf || right_count < min_leaf {
                    continue;
                }

                let next_x = pairs[split + 1].0;
                if !(x < next_x) {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let left_sse = left_sq - left_sum * left_sum / left_count as f64;
                let right_sse = right_sq - right_sum * right_sum / right_count as f64;
                let gain = parent_sse - (left_sse + right_sse);

                if gain > MIN_SPLIT_GAIN && best.as_ref().map_or(true, |b| gain > b.gain) {
                    // adjacent floats: the midpoint rounds up to next_x
                    let mut threshold = x + (next_x - x) / 2.0;
                    if threshold >= next_x {
                        threshold = x;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }
}

impl Regressor for DecisionTreeRegressor {
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        self.config.validate()?;
        check_fit_inputs(features, targets)?;

        let num_features = features.ncols();
        let mut importances = vec![0.0; num_features];
        let indices: Vec<SampleIndex> = (0..features.nrows()).collect();
        let root = self.build(features, targets, indices, 0, &mut importances);

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        self.root = Some(root);
        self.num_features = Some(num_features);
        self.feature_importances = Some(Array1::from_vec(importances));
        Ok(())
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        let (root, num_features) = match (&self.root, self.num_features) {
            (Some(root), Some(n)) => (root, n),
            _ => return Err(BaggingError::not_fitted("DecisionTreeRegressor")),
        };
        check_num_features(num_features, features)?;

        Ok(features
            .axis_iter(Axis(0))
            .map(|row| root.predict_row(&row))
            .collect())
    }

    fn name(&self) -> &'static str {
        "decision_tree"
    }

    fn num_features(&self) -> Option<usize> {
        self.num_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn test_fits_step_function_exactly() {
        let x = arr2(&[[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]]);
        let y = arr1(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();

        assert_eq!(tree.depth(), Some(1));
        assert_eq!(tree.num_leaves(), Some(2));
        match tree.root().unwrap() {
            TreeNode::Split { feature, threshold, .. } => {
                assert_eq!(*feature, 0);
                assert_eq!(*threshold, 3.5);
            }
            other => panic!("expected split, got {:?}", other),
        }

        let pred = tree.predict(&arr2(&[[0.0], [3.4], [3.6], [100.0]]).view()).unwrap();
        assert_eq!(pred.to_vec(), vec![0.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn test_picks_informative_feature() {
        let x = arr2(&[[5.0, 1.0], [1.0, 2.0], [4.0, 3.0], [2.0, 4.0]]);
        let y = arr1(&[1.0, 1.0, 9.0, 9.0]);
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();
        let importances = tree.feature_importances().unwrap();
        assert_eq!(importances[0], 0.0);
        assert_eq!(importances[1], 1.0);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = Array2::from_shape_fn((32, 1), |(i, _)| i as f64);
        let y = Array1::from_shape_fn(32, |i| (i * i) as f64);
        let mut tree = DecisionTreeRegressor::new().with_max_depth(2);
        tree.fit(&x.view(), &y.view()).unwrap();
        assert!(tree.depth().unwrap() <= 2);
        assert!(tree.num_leaves().unwrap() <= 4);
    }

    #[test]
    fn test_min_samples_leaf_respected() {
        let x = Array2::from_shape_fn((10, 1), |(i, _)| i as f64);
        let y = Array1::from_shape_fn(10, |i| if i == 0 { 100.0 } else { 0.0 });
        let mut tree = DecisionTreeRegressor::new().with_min_samples_leaf(3);
        tree.fit(&x.view(), &y.view()).unwrap();

        fn check(node: &TreeNode) {
            match node {
                TreeNode::Leaf { n_samples, .. } => assert!(*n_samples >= 3),
                TreeNode::Split { left, right, .. } => {
                    check(left);
                    check(right);
                }
            }
        }
        check(tree.root().unwrap());
    }

    #[test]
    fn test_constant_target_is_single_leaf() {
        let x = arr2(&[[1.0], [2.0], [3.0]]);
        let y = arr1(&[4.0, 4.0, 4.0]);
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();
        assert_eq!(tree.num_leaves(), Some(1));
        assert_eq!(tree.predict(&arr2(&[[9.0]]).view()).unwrap()[0], 4.0);
    }

    #[test]
    fn test_duplicate_inputs_cannot_split() {
        let x = arr2(&[[1.0], [1.0], [1.0]]);
        let y = arr1(&[0.0, 3.0, 6.0]);
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();
        assert_eq!(tree.num_leaves(), Some(1));
        assert_eq!(tree.predict(&x.view()).unwrap()[0], 3.0);
    }

    #[test]
    fn test_adjacent_float_inputs_split_cleanly() {
        let a = 1.0 + f64::EPSILON;
        let b = 1.0 + 2.0 * f64::EPSILON;
        let x = arr2(&[[a], [b]]);
        let y = arr1(&[0.0, 10.0]);

        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();
        assert_eq!(tree.depth(), Some(1));
        assert_eq!(tree.num_leaves(), Some(2));
        match tree.root().unwrap() {
            TreeNode::Split { threshold, .. } => {
                assert!(a <= *threshold && *threshold < b);
            }
            other => panic!("expected split, got {:?}", other),
        }
        assert_eq!(tree.predict(&x.view()).unwrap().to_vec(), vec![0.0, 10.0]);

        let mut shallow = DecisionTreeRegressor::new().with_max_depth(5);
        shallow.fit(&x.view(), &y.view()).unwrap();
        let pred = shallow.predict(&arr2(&[[0.0], [5.0]]).view()).unwrap();
        assert!(pred.iter().all(|p| p.is_finite()));
        assert_eq!(pred.to_vec(), vec![0.0, 10.0]);
    }

    #[test]
    fn test_leaves_are_never_empty() {
        let base = 1.0 + f64::EPSILON;
        let x = Array2::from_shape_fn((12, 1), |(i, _)| {
            let mut v = base;
            for _ in 0..(i % 4) {
                v = f64::from_bits(v.to_bits() + 1);
            }
            v
        });
        let y = Array1::from_shape_fn(12, |i| (i % 4) as f64 * 3.0);
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&x.view(), &y.view()).unwrap();

        fn check(node: &TreeNode) {
            match node {
                TreeNode::Leaf { value, n_samples } => {
                    assert!(*n_samples > 0);
                    assert!(value.is_finite());
                }
                TreeNode::Split { left, right, .. } => {
                    check(left);
                    check(right);
                }
            }
        }
        check(tree.root().unwrap());
        assert_eq!(tree.num_leaves(), Some(4));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let x = arr2(&[[1.0], [2.0]]);
        let y = arr1(&[1.0, 2.0]);
        let mut tree = DecisionTreeRegressor::new().with_min_samples_split(1);
        assert!(matches!(
            tree.fit(&x.view(), &y.view()),
            Err(BaggingError::InvalidParameter { .. })
        ));
        let mut tree = DecisionTreeRegressor::new().with_max_depth(0);
        assert!(tree.fit(&x.view(), &y.view()).is_err());
    }

    #[test]
    fn test_predict_checks_width() {
        let mut tree = DecisionTreeRegressor::new();
        tree.fit(&arr2(&[[1.0, 2.0], [2.0, 1.0]]).view(), &arr1(&[1.0, 2.0]).view())
            .unwrap();
        assert!(matches!(
            tree.predict(&arr2(&[[1.0]]).view()),
            Err(BaggingError::ShapeMismatch { .. })
        ));
    }
}
