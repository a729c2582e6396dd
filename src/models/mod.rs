//! Forecast output types and the recurrent sequence model

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

pub mod recurrent;

pub use recurrent::RecurrentNet;

/// Forecast result: one predicted value per future calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Forecasted values, in price space
    values: Vec<f64>,
    /// Future dates, strictly increasing, one per value
    dates: Vec<NaiveDate>,
    /// Number of periods forecasted
    horizon: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if values.len() != dates.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Values length ({}) doesn't match dates length ({})",
                values.len(),
                dates.len()
            )));
        }

        let horizon = values.len();
        Ok(Self {
            values,
            dates,
            horizon,
        })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the forecast dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Iterate over (date, value) pairs in forecast order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
