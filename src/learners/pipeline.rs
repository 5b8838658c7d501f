//! Preprocessing steps chained in front of a regressor.

use crate::core::error::{BaggingError, Result};
use crate::core::traits::{check_fit_inputs, check_num_features, Regressor, Transformer};
use crate::core::types::*;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// A sequence of [`Transformer`]s followed by a final [`Regressor`].
///
/// `fit` fits every step on the output of the previous one and then fits the
/// regressor on the fully transformed matrix. `predict` replays the fitted
/// steps before predicting.
#[derive(Debug)]
pub struct Pipeline<R: Regressor> {
    steps: Vec<Box<dyn Transformer>>,
    regressor: R,
    num_features: Option<usize>,
}

impl<R: Regressor> Pipeline<R> {
    /// Pipeline with no preprocessing steps.
    pub fn new(regressor: R) -> Self {
        Self {
            steps: Vec::new(),
            regressor,
            num_features: None,
        }
    }

    /// Append a preprocessing step.
    pub fn with_step<T: Transformer + 'static>(mut self, step: T) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of preprocessing steps.
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Names of the steps in application order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// The final regressor.
    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    fn apply_steps(&self, features: &ArrayView2<'_, Feature>) -> Result<Array2<Feature>> {
        let mut current = features.to_owned();
        for step in &self.steps {
            current = step.transform(&current.view())?;
        }
        Ok(current)
    }
}

impl<R: Regressor> Regressor for Pipeline<R> {
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        check_fit_inputs(features, targets)?;

        let mut current = features.to_owned();
        for step in self.steps.iter_mut() {
            log::trace!("Fitting pipeline step {}", step.name());
            current = step.fit_transform(&current.view())?;
        }
        self.regressor.fit(&current.view(), targets)?;
        self.num_features = Some(features.ncols());
        Ok(())
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        let num_features = self
            .num_features
            .ok_or_else(|| BaggingError::not_fitted("Pipeline"))?;
        check_num_features(num_features, features)?;
        let transformed = self.apply_steps(features)?;
        self.regressor.predict(&transformed.view())
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn num_features(&self) -> Option<usize> {
        self.num_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learners::{LinearRegression, MeanRegressor};
    use crate::preprocessing::{MinMaxScaler, StandardScaler};
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_scaled_linear_matches_plain_linear() {
        let x = arr2(&[[10.0, 0.5], [20.0, 0.1], [30.0, 0.9], [40.0, 0.4], [50.0, 0.2]]);
        let y = arr1(&[1.0, 2.5, 2.0, 4.5, 5.5]);

        let mut plain = LinearRegression::new();
        plain.fit(&x.view(), &y.view()).unwrap();
        let mut piped = Pipeline::new(LinearRegression::new()).with_step(StandardScaler::new());
        piped.fit(&x.view(), &y.view()).unwrap();

        let query = arr2(&[[25.0, 0.3], [60.0, 1.0]]);
        let a = plain.predict(&query.view()).unwrap();
        let b = piped.predict(&query.view()).unwrap();
        for (p, q) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(p, q, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_steps_applied_in_order() {
        let pipeline = Pipeline::new(MeanRegressor::new())
            .with_step(StandardScaler::new())
            .with_step(MinMaxScaler::new());
        assert_eq!(pipeline.num_steps(), 2);
        assert_eq!(pipeline.step_names(), vec!["standard_scaler", "min_max_scaler"]);
    }

    #[test]
    fn test_not_fitted_and_width() {
        let mut pipeline = Pipeline::new(MeanRegressor::new()).with_step(StandardScaler::new());
        assert!(matches!(
            pipeline.predict(&arr2(&[[1.0]]).view()),
            Err(BaggingError::NotFitted { .. })
        ));
        pipeline
            .fit(&arr2(&[[1.0], [2.0]]).view(), &arr1(&[1.0, 3.0]).view())
            .unwrap();
        assert!(pipeline.is_fitted());
        assert!(matches!(
            pipeline.predict(&arr2(&[[1.0, 2.0]]).view()),
            Err(BaggingError::ShapeMismatch { .. })
        ));
    }
}
