//! Core dataset structure.
//!
//! A [`Dataset`] is an immutable, validated pairing of a feature matrix and a
//! target vector. Rows of the matrix and entries of the vector always refer to
//! the same sample.

use crate::core::error::{BaggingError, Result};
use crate::core::types::*;
use crate::dataset::{DatasetStatistics, FeatureStatistics};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// In-memory regression dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Feature matrix (num_data × num_features)
    features: Array2<Feature>,
    /// Regression targets (num_data,)
    targets: Array1<Target>,
    /// Feature names for reporting
    feature_names: Option<Vec<String>>,
}

impl Dataset {
    /// Create a new dataset from arrays.
    ///
    /// Fails with [`BaggingError::InvalidDatasetSize`] for an empty matrix,
    /// [`BaggingError::ShapeMismatch`] when rows and targets disagree, and
    /// [`BaggingError::Dataset`] for zero-width matrices or non-finite values.
    pub fn new(features: Array2<Feature>, targets: Array1<Target>) -> Result<Self> {
        let num_data = features.nrows();
        if num_data == 0 {
            return Err(BaggingError::invalid_dataset_size(0));
        }

        if targets.len() != num_data {
            return Err(BaggingError::shape_mismatch(
                format!("features rows: {}", num_data),
                format!("targets length: {}", targets.len()),
            ));
        }

        if features.ncols() == 0 {
            return Err(BaggingError::dataset("dataset must have at least one feature"));
        }

        if let Some(((row, col), _)) = features.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(BaggingError::dataset(format!(
                "non-finite feature value at row {}, column {}",
                row, col
            )));
        }

        if let Some((row, _)) = targets.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(BaggingError::dataset(format!(
                "non-finite target value at row {}",
                row
            )));
        }

        Ok(Dataset {
            features,
            targets,
            feature_names: None,
        })
    }

    /// Create a dataset from row vectors.
    pub fn from_rows(rows: Vec<Vec<Feature>>, targets: Vec<Target>) -> Result<Self> {
        let num_data = rows.len();
        if num_data == 0 {
            return Err(BaggingError::invalid_dataset_size(0));
        }

        let num_features = rows[0].len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != num_features) {
            return Err(BaggingError::shape_mismatch(
                format!("{} features in every row", num_features),
                format!("{} features in row {}", row.len(), i),
            ));
        }

        let flat: Vec<Feature> = rows.into_iter().flatten().collect();
        let features = Array2::from_shape_vec((num_data, num_features), flat)
            .map_err(|e| BaggingError::dataset(format!("failed to build feature matrix: {}", e)))?;

        Self::new(features, Array1::from_vec(targets))
    }

    /// Attach feature names, one per column.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.num_features() {
            return Err(BaggingError::shape_mismatch(
                format!("{} feature names", self.num_features()),
                format!("{} feature names", names.len()),
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Number of samples.
    pub fn num_data(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Feature matrix view.
    pub fn features(&self) -> ArrayView2<'_, Feature> {
        self.features.view()
    }

    /// Target vector view.
    pub fn targets(&self) -> ArrayView1<'_, Target> {
        self.targets.view()
    }

    /// Feature names, if any were attached.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// The (input, target) pair at `index`.
    pub fn sample(&self, index: SampleIndex) -> Result<(ArrayView1<'_, Feature>, Target)> {
        if index >= self.num_data() {
            return Err(BaggingError::invalid_parameter(
                "index",
                index.to_string(),
                format!("must be less than {}", self.num_data()),
            ));
        }
        Ok((self.features.row(index), self.targets[index]))
    }

    /// Gather the samples at `indices`, in order. Repeated indices are kept.
    pub fn select(&self, indices: &[SampleIndex]) -> Result<(Array2<Feature>, Array1<Target>)> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.num_data()) {
            return Err(BaggingError::invalid_parameter(
                "index",
                bad.to_string(),
                format!("must be less than {}", self.num_data()),
            ));
        }
        Ok((
            self.features.select(Axis(0), indices),
            self.targets.select(Axis(0), indices),
        ))
    }

    /// Create a new dataset from the samples at `indices`.
    pub fn subset(&self, indices: &[SampleIndex]) -> Result<Self> {
        let (features, targets) = self.select(indices)?;
        let mut subset = Self::new(features, targets)?;
        subset.feature_names = self.feature_names.clone();
        Ok(subset)
    }

    /// Per-feature and target summary statistics.
    pub fn statistics(&self) -> DatasetStatistics {
        let feature_stats = self
            .features
            .axis_iter(Axis(1))
            .map(|column| FeatureStatistics::from_values(column.iter().copied()))
            .collect();

        DatasetStatistics {
            num_samples: self.num_data(),
            num_features: self.num_features(),
            feature_stats,
            target_stats: FeatureStatistics::from_values(self.targets.iter().copied()),
        }
    }
}
