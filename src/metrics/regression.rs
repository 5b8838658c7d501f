//! Regression metrics.
//!
//! Every function takes the ground truth first and the predictions second,
//! and rejects empty or length-mismatched inputs.

use crate::core::error::{BaggingError, Result};
use crate::core::types::{Prediction, Target};

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Regression evaluation metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Square Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// R-squared (coefficient of determination)
    pub r2: f64,
}

fn check_inputs(y_true: &ArrayView1<'_, Target>, y_pred: &ArrayView1<'_, Prediction>) -> Result<()> {
    if y_true.is_empty() {
        return Err(BaggingError::invalid_dataset_size(0));
    }
    if y_true.len() != y_pred.len() {
        return Err(BaggingError::shape_mismatch(
            format!("{} predictions", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    Ok(())
}

/// Mean of squared residuals.
pub fn mean_squared_error(
    y_true: &ArrayView1<'_, Target>,
    y_pred: &ArrayView1<'_, Prediction>,
) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    let sse: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    Ok(sse / y_true.len() as f64)
}

/// Square root of [`mean_squared_error`].
pub fn root_mean_squared_error(
    y_true: &ArrayView1<'_, Target>,
    y_pred: &ArrayView1<'_, Prediction>,
) -> Result<f64> {
    mean_squared_error(y_true, y_pred).map(f64::sqrt)
}

/// Mean of absolute residuals.
pub fn mean_absolute_error(
    y_true: &ArrayView1<'_, Target>,
    y_pred: &ArrayView1<'_, Prediction>,
) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    let sae: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).abs())
        .sum();
    Ok(sae / y_true.len() as f64)
}

/// Coefficient of determination.
///
/// For constant `y_true` the score is 1.0 when the predictions are exact and
/// 0.0 otherwise.
pub fn r2_score(y_true: &ArrayView1<'_, Target>, y_pred: &ArrayView1<'_, Prediction>) -> Result<f64> {
    check_inputs(y_true, y_pred)?;
    let n = y_true.len() as f64;
    let mean = y_true.sum() / n;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean) * (t - mean)).sum();

    if ss_tot > 0.0 {
        Ok(1.0 - ss_res / ss_tot)
    } else if ss_res == 0.0 {
        Ok(1.0)
    } else {
        Ok(0.0)
    }
}

/// Evaluate all regression metrics at once.
pub fn evaluate_regression(
    y_true: &ArrayView1<'_, Target>,
    y_pred: &ArrayView1<'_, Prediction>,
) -> Result<RegressionMetrics> {
    let mse = mean_squared_error(y_true, y_pred)?;
    Ok(RegressionMetrics {
        mse,
        rmse: mse.sqrt(),
        mae: mean_absolute_error(y_true, y_pred)?,
        r2: r2_score(y_true, y_pred)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_basic_metrics() {
        let y_true = arr1(&[3.0, -0.5, 2.0, 7.0]);
        let y_pred = arr1(&[2.5, 0.0, 2.0, 8.0]);

        let mse = mean_squared_error(&y_true.view(), &y_pred.view()).unwrap();
        assert_abs_diff_eq!(mse, 0.375, epsilon = 1e-12);
        let mae = mean_absolute_error(&y_true.view(), &y_pred.view()).unwrap();
        assert_abs_diff_eq!(mae, 0.5, epsilon = 1e-12);
        let r2 = r2_score(&y_true.view(), &y_pred.view()).unwrap();
        assert_abs_diff_eq!(r2, 0.948_608_137_044_968, epsilon = 1e-9);

        let all = evaluate_regression(&y_true.view(), &y_pred.view()).unwrap();
        assert_abs_diff_eq!(all.rmse, 0.375_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(all.mse, mse);
    }

    #[test]
    fn test_r2_constant_targets() {
        let y_true = arr1(&[2.0, 2.0]);
        assert_eq!(r2_score(&y_true.view(), &arr1(&[2.0, 2.0]).view()).unwrap(), 1.0);
        assert_eq!(r2_score(&y_true.view(), &arr1(&[2.0, 3.0]).view()).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(matches!(
            mean_squared_error(&empty.view(), &empty.view()),
            Err(BaggingError::InvalidDatasetSize { .. })
        ));
        assert!(matches!(
            r2_score(&arr1(&[1.0, 2.0]).view(), &arr1(&[1.0]).view()),
            Err(BaggingError::ShapeMismatch { .. })
        ));
    }
}
