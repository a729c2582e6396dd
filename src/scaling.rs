//! Reversible min-max normalization for price series

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Reversible min-max scaling transform fit on one training series
///
/// Maps the fit range linearly onto [0, 1]. The transform is affine, not
/// clamped: values outside the fit range map outside [0, 1] and still
/// invert exactly. The scaler is persisted next to the model it was fit
/// for; applying a model with a mismatched scaler is undefined, so the
/// artifact store only ever hands the two out as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the scaler on a training series
    ///
    /// Fails on an empty series and on a constant series, where the
    /// normalization denominator would be zero.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::DataUnavailable(
                "Cannot fit a scaler on an empty series".to_string(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }

        if max == min {
            return Err(ForecastError::DegenerateRange { value: min });
        }

        Ok(Self { min, max })
    }

    /// Map values linearly into the fit range's [0, 1] image
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        let span = self.max - self.min;
        values.iter().map(|v| (v - self.min) / span).collect()
    }

    /// Exact algebraic inverse of [`transform`](Self::transform)
    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        let span = self.max - self.min;
        scaled.iter().map(|v| v * span + self.min).collect()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
