//! Core trait definitions for the bagging library.
//!
//! The ensemble only ever talks to base learners through these traits, so any
//! model that can be created fresh, fit on a matrix of inputs, and asked for
//! predictions can be bagged.

use crate::core::error::Result;
use crate::core::types::*;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use std::fmt::Debug;

/// A trainable regression model.
///
/// `fit` may be called on a freshly created instance only once by the
/// ensemble; implementations are free to support refitting.
pub trait Regressor: Send + Sync + Debug {
    /// Fit the model on `features` (N x D) and `targets` (N).
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()>;

    /// Predict one value per row of `features`.
    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>>;

    /// Short model name used in logs.
    fn name(&self) -> &'static str;

    /// Number of features seen during `fit`, `None` before fitting.
    fn num_features(&self) -> Option<usize>;

    /// Check if the model has been fit.
    fn is_fitted(&self) -> bool {
        self.num_features().is_some()
    }
}

impl Regressor for Box<dyn Regressor> {
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        (**self).fit(features, targets)
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        (**self).predict(features)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn num_features(&self) -> Option<usize> {
        (**self).num_features()
    }
}

/// Produces fresh, untrained learners with a fixed configuration.
pub trait LearnerFactory: Send + Sync {
    /// Learner type produced by this factory.
    type Learner: Regressor;

    /// Create a new untrained learner.
    fn create(&self) -> Self::Learner;
}

impl<F, L> LearnerFactory for F
where
    F: Fn() -> L + Send + Sync,
    L: Regressor,
{
    type Learner = L;

    fn create(&self) -> L {
        self()
    }
}

/// A feature transformation that learns its parameters from data.
pub trait Transformer: Send + Sync + Debug {
    /// Learn transformation parameters from `features`.
    fn fit(&mut self, features: &ArrayView2<'_, Feature>) -> Result<()>;

    /// Apply the learned transformation.
    fn transform(&self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Feature>>;

    /// Fit and transform in one step.
    fn fit_transform(&mut self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        self.fit(features)?;
        self.transform(features)
    }

    /// Short transformer name used in logs.
    fn name(&self) -> &'static str;
}

/// Check that a query matrix has the number of columns a model was trained on.
pub fn check_num_features(expected: usize, features: &ArrayView2<'_, Feature>) -> Result<()> {
    if features.ncols() != expected {
        return Err(crate::core::error::BaggingError::shape_mismatch(
            format!("{} features", expected),
            format!("{} features", features.ncols()),
        ));
    }
    Ok(())
}

/// Check that a feature matrix and a target vector describe the same samples.
pub fn check_fit_inputs(
    features: &ArrayView2<'_, Feature>,
    targets: &ArrayView1<'_, Target>,
) -> Result<()> {
    if features.nrows() == 0 {
        return Err(crate::core::error::BaggingError::invalid_dataset_size(0));
    }
    if features.nrows() != targets.len() {
        return Err(crate::core::error::BaggingError::shape_mismatch(
            format!("{} targets", features.nrows()),
            format!("{} targets", targets.len()),
        ));
    }
    Ok(())
}
