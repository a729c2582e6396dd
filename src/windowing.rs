//! Supervised windowing of a scaled series

use crate::error::{ForecastError, Result};

/// Turn a scaled series into fixed-length input windows and next-step targets
///
/// For a series of length `L` this produces exactly `L - window_size`
/// pairs: `inputs[i]` is `scaled[i..i + window_size]` and `targets[i]` is
/// `scaled[i + window_size]`. Pure and deterministic.
///
/// Fails when `L <= window_size`, since that yields no trainable pair. A
/// series of exactly `window_size` points is still usable as an inference
/// window, just not for training.
pub fn make_sequences(scaled: &[f64], window_size: usize) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    if window_size == 0 {
        return Err(ForecastError::InvalidParameter(
            "Window size must be at least 1".to_string(),
        ));
    }
    if scaled.len() <= window_size {
        return Err(ForecastError::InsufficientData {
            required: window_size + 1,
            actual: scaled.len(),
        });
    }

    let count = scaled.len() - window_size;
    let mut inputs = Vec::with_capacity(count);
    let mut targets = Vec::with_capacity(count);
    for i in 0..count {
        inputs.push(scaled[i..i + window_size].to_vec());
        targets.push(scaled[i + window_size]);
    }

    Ok((inputs, targets))
}
