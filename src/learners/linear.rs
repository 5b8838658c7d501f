//! Ordinary least squares and ridge regression.

use crate::core::constants::{DEFAULT_RIDGE_ALPHA, SINGULAR_PIVOT_TOLERANCE};
use crate::core::error::{BaggingError, Result};
use crate::core::traits::{check_fit_inputs, check_num_features, Regressor};
use crate::core::types::*;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Linear model fit by solving the normal equations.
///
/// With `alpha > 0` the coefficients are L2-penalised; the intercept never is.
/// When `fit_intercept` is set, inputs and targets are centred before solving
/// and the intercept is recovered from the means.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    fit_intercept: bool,
    alpha: f64,
    coefficients: Option<Array1<f64>>,
    intercept: f64,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self {
            fit_intercept: true,
            alpha: DEFAULT_RIDGE_ALPHA,
            coefficients: None,
            intercept: 0.0,
        }
    }
}

impl LinearRegression {
    /// Unfitted ordinary least squares model with an intercept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unfitted ridge model.
    pub fn ridge(alpha: f64) -> Self {
        Self::default().with_alpha(alpha)
    }

    /// Whether to fit an intercept term.
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// L2 penalty strength.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// L2 penalty strength.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether an intercept is fit.
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Fitted coefficients, one per feature.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    /// Fitted intercept (0.0 when `fit_intercept` is false).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Target>,
    ) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(BaggingError::invalid_parameter(
                "alpha",
                self.alpha.to_string(),
                "must be a finite value >= 0",
            ));
        }
        check_fit_inputs(features, targets)?;

        let num_features = features.ncols();
        let (x, y, x_mean, y_mean) = if self.fit_intercept {
            let x_mean = features
                .mean_axis(Axis(0))
                .ok_or_else(|| BaggingError::invalid_dataset_size(0))?;
            let y_mean = targets.mean().unwrap_or(0.0);
            (
                features - &x_mean,
                targets - y_mean,
                x_mean,
                y_mean,
            )
        } else {
            (
                features.to_owned(),
                targets.to_owned(),
                Array1::zeros(num_features),
                0.0,
            )
        };

        let mut gram = x.t().dot(&x);
        for j in 0..num_features {
            gram[[j, j]] += self.alpha;
        }
        let rhs = x.t().dot(&y);

        let coefficients = solve_linear_system(gram, rhs).map_err(|e| {
            BaggingError::training(format!("linear regression failed: {}", e))
        })?;

        self.intercept = if self.fit_intercept {
            y_mean - x_mean.dot(&coefficients)
        } else {
            0.0
        };
        self.coefficients = Some(coefficients);
        Ok(())
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Prediction>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or_else(|| BaggingError::not_fitted("LinearRegression"))?;
        check_num_features(coefficients.len(), features)?;
        Ok(features.dot(coefficients) + self.intercept)
    }

    fn name(&self) -> &'static str {
        if self.alpha > 0.0 {
            "ridge"
        } else {
            "linear_regression"
        }
    }

    fn num_features(&self) -> Option<usize> {
        self.coefficients.as_ref().map(|c| c.len())
    }
}

/// Solve `a x = b` by Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = b.len();
    let scale = a.diag().iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return Err(BaggingError::numerical("singular matrix (all-zero diagonal)"));
    }
    let tolerance = SINGULAR_PIVOT_TOLERANCE * scale;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot_row, col]].abs() <= tolerance {
            return Err(BaggingError::numerical(format!(
                "singular matrix (pivot {} in column {})",
                a[[pivot_row, col]],
                col
            )));
        }
        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_recovers_exact_line() {
        let x = arr2(&[[1.0, 0.0], [2.0, 1.0], [3.0, 5.0], [4.0, 2.0]]);
        let y = x.column(0).mapv(|v| 2.0 * v) - x.column(1).mapv(|v| 3.0 * v) + 1.5;
        let mut model = LinearRegression::new();
        model.fit(&x.view(), &y.view()).unwrap();

        let coef = model.coefficients().unwrap();
        assert_abs_diff_eq!(coef[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(coef[1], -3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(model.intercept(), 1.5, epsilon = 1e-9);

        let pred = model.predict(&arr2(&[[10.0, 1.0]]).view()).unwrap();
        assert_abs_diff_eq!(pred[0], 18.5, epsilon = 1e-9);
    }

    #[test]
    fn test_without_intercept() {
        let x = arr2(&[[1.0], [2.0], [3.0]]);
        let y = arr1(&[2.0, 4.0, 6.0]);
        let mut model = LinearRegression::new().with_fit_intercept(false);
        model.fit(&x.view(), &y.view()).unwrap();
        assert_abs_diff_eq!(model.coefficients().unwrap()[0], 2.0, epsilon = 1e-12);
        assert_eq!(model.intercept(), 0.0);
    }

    #[test]
    fn test_ridge_shrinks_coefficients() {
        let x = arr2(&[[1.0], [2.0], [3.0], [4.0]]);
        let y = arr1(&[1.0, 2.0, 3.0, 4.0]);

        let mut ols = LinearRegression::new();
        ols.fit(&x.view(), &y.view()).unwrap();
        let mut ridge = LinearRegression::ridge(5.0);
        ridge.fit(&x.view(), &y.view()).unwrap();

        // centred Gram = 5, so ridge slope = 5 / (5 + 5)
        assert_abs_diff_eq!(ridge.coefficients().unwrap()[0], 0.5, epsilon = 1e-12);
        assert!(ridge.coefficients().unwrap()[0] < ols.coefficients().unwrap()[0]);
        // intercept is unpenalised: the fit passes through the means
        assert_abs_diff_eq!(ridge.intercept(), 2.5 - 0.5 * 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_system_is_training_error() {
        // every row identical, as in a degenerate bootstrap sample
        let x = arr2(&[[3.0], [3.0], [3.0]]);
        let y = arr1(&[1.0, 1.0, 1.0]);
        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x.view(), &y.view()),
            Err(BaggingError::Training { .. })
        ));

        let mut ridge = LinearRegression::ridge(1.0);
        ridge.fit(&x.view(), &y.view()).unwrap();
        assert_abs_diff_eq!(ridge.predict(&x.view()).unwrap()[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_small_magnitude_features_are_not_singular() {
        let x = Array2::from_shape_fn((50, 1), |(i, _)| i as f64 * 1e-8);
        let y = x.column(0).mapv(|v| 3e8 * v + 1.0);
        let mut model = LinearRegression::new();
        model.fit(&x.view(), &y.view()).unwrap();

        assert_abs_diff_eq!(model.coefficients().unwrap()[0] / 3e8, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.intercept(), 1.0, epsilon = 1e-6);
        let pred = model.predict(&arr2(&[[1e-7]]).view()).unwrap();
        assert_abs_diff_eq!(pred[0], 31.0, epsilon = 1e-5);
    }

    #[test]
    fn test_negative_alpha_rejected() {
        let mut model = LinearRegression::ridge(-1.0);
        let result = model.fit(&arr2(&[[1.0], [2.0]]).view(), &arr1(&[1.0, 2.0]).view());
        assert!(matches!(result, Err(BaggingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_not_fitted_and_width() {
        let model = LinearRegression::new();
        assert!(matches!(
            model.predict(&arr2(&[[1.0]]).view()),
            Err(BaggingError::NotFitted { .. })
        ));

        let mut model = LinearRegression::new();
        model
            .fit(&arr2(&[[1.0], [2.0]]).view(), &arr1(&[1.0, 3.0]).view())
            .unwrap();
        assert!(matches!(
            model.predict(&arr2(&[[1.0, 2.0]]).view()),
            Err(BaggingError::ShapeMismatch { .. })
        ));
    }
}
