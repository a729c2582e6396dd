//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Validation metrics reported by a completed training job
///
/// Computed in scaled space on the held-out validation partition. MAPE is
/// optional: rows with a zero true value are skipped, and when every row
/// is zero the metric is `None` (serialized as `null`) rather than NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over rows with non-zero true values
    pub mape: Option<f64>,
}

/// Evaluate predictions against true values
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> Result<ValidationMetrics> {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "True and predicted values must have the same non-zero length".to_string(),
        ));
    }

    let n = y_true.len() as f64;

    let errors: Vec<f64> = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| t - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Percentage error is undefined where the true value is zero
    let nonzero: Vec<f64> = y_true
        .iter()
        .zip(errors.iter())
        .filter(|(&t, _)| t != 0.0)
        .map(|(&t, &e)| (e.abs() / t.abs()) * 100.0)
        .collect();
    let mape = if nonzero.is_empty() {
        None
    } else {
        Some(nonzero.iter().sum::<f64>() / nonzero.len() as f64)
    };

    Ok(ValidationMetrics { mae, rmse, mape })
}

impl std::fmt::Display for ValidationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Metrics:")?;
        writeln!(f, "  MAE:   {:.6}", self.mae)?;
        writeln!(f, "  RMSE:  {:.6}", self.rmse)?;
        match self.mape {
            Some(mape) => writeln!(f, "  MAPE:  {:.4}%", mape)?,
            None => writeln!(f, "  MAPE:  n/a (all true values zero)")?,
        }
        Ok(())
    }
}
