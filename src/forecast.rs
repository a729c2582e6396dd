//! Autoregressive multi-step forecasting from a trained artifact

use crate::artifacts::ArtifactStore;
use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use crate::utils::future_dates;

/// Produces N-step-ahead forecasts by iterated single-step prediction
///
/// Each step feeds the model's own previous prediction back in as input,
/// so errors compound over the horizon; there is no corrective signal
/// mid-horizon and no clamping of outputs. That degradation with distance
/// is inherent to the scheme, not a defect to patch over.
pub struct ForecastEngine {
    artifacts: ArtifactStore,
}

impl ForecastEngine {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self { artifacts }
    }

    /// Forecast `horizon` daily values following the trailing series
    ///
    /// Loads the (model, scaler) pair for the symbol, seeds the window
    /// with the most recent `window_size` scaled observations, iterates,
    /// and inverse-transforms the whole predicted sequence once at the
    /// end. Dates advance one calendar day per step from the last known
    /// date.
    pub fn forecast(
        &self,
        symbol: &str,
        horizon: usize,
        trailing: &PriceSeries,
    ) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }

        let (model, scaler) = self.artifacts.load(symbol)?;

        let window_size = model.window_size();
        if trailing.len() < window_size {
            return Err(ForecastError::InsufficientHistory {
                required: window_size,
                actual: trailing.len(),
            });
        }

        let scaled = scaler.transform(&trailing.closes());
        let mut window: Vec<f64> = scaled[scaled.len() - window_size..].to_vec();

        let mut predicted_scaled = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = model.predict_one(&window)?;
            predicted_scaled.push(next);
            window.remove(0);
            window.push(next);
        }

        // One inverse transform over the full sequence, not per step
        let values = scaler.inverse_transform(&predicted_scaled);

        let last_date = trailing.last_date().ok_or_else(|| {
            ForecastError::InsufficientHistory {
                required: window_size,
                actual: 0,
            }
        })?;
        let dates = future_dates(last_date, horizon);

        tracing::info!(symbol, horizon, %last_date, "Forecast produced");
        ForecastResult::new(dates, values)
    }
}
