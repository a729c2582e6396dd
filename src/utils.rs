//! Utility functions for the stock_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Split windowed pairs chronologically into train and validation partitions
///
/// No shuffling: temporal order is preserved so the validation partition
/// never leaks future information into training. The first
/// `round(len * train_ratio)` pairs train, the rest validate.
pub fn train_validation_split(
    inputs: Vec<Vec<f64>>,
    targets: Vec<f64>,
    train_ratio: f64,
) -> Result<(Vec<Vec<f64>>, Vec<f64>, Vec<Vec<f64>>, Vec<f64>)> {
    if inputs.len() != targets.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "Inputs length ({}) doesn't match targets length ({})",
            inputs.len(),
            targets.len()
        )));
    }
    if train_ratio <= 0.0 || train_ratio >= 1.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "Train ratio must be between 0 and 1, got {}",
            train_ratio
        )));
    }

    let train_size = ((inputs.len() as f64) * train_ratio).round() as usize;
    let train_size = train_size.min(inputs.len());

    let mut train_inputs = inputs;
    let val_inputs = train_inputs.split_off(train_size);
    let mut train_targets = targets;
    let val_targets = train_targets.split_off(train_size);

    Ok((train_inputs, train_targets, val_inputs, val_targets))
}

/// Future calendar dates for a forecast horizon
///
/// One day per step starting the day after `last_date`, regardless of
/// weekends or holidays.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|i| last_date + Duration::days(i))
        .collect()
}
