//! Recurrent sequence model for one-step-ahead price prediction
//!
//! A single-hidden-layer Elman network over a scalar sequence:
//!
//! ```text
//! h_t = tanh(wx * x_t + Wh h_(t-1) + bh)
//! y   = wo . h_T + bo
//! ```
//!
//! Training is full backpropagation through time per sample with plain SGD
//! and gradient-norm clipping. The network consumes a window of scaled
//! values and emits one scaled scalar; multi-step forecasts come from
//! iterating it autoregressively (see the forecast engine).

use crate::error::{ForecastError, Result};
use ndarray::{Array1, Array2, Axis};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Gradient-norm clipping threshold; tanh recurrences blow up without it
const GRAD_CLIP: f64 = 5.0;

/// Trainable recurrent network with serde-persistable weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrentNet {
    window_size: usize,
    hidden_size: usize,
    learning_rate: f64,
    /// Input weights, one per hidden unit (scalar input)
    wx: Array1<f64>,
    /// Recurrent weights, hidden x hidden
    wh: Array2<f64>,
    /// Hidden bias
    bh: Array1<f64>,
    /// Output weights
    wo: Array1<f64>,
    /// Output bias
    bo: f64,
}

impl RecurrentNet {
    /// Create an untrained network with Gaussian-initialized weights
    pub fn new(window_size: usize, hidden_size: usize, learning_rate: f64) -> Result<Self> {
        if window_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be at least 1".to_string(),
            ));
        }
        if hidden_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Hidden size must be at least 1".to_string(),
            ));
        }
        if learning_rate <= 0.0 || !learning_rate.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Learning rate must be positive and finite, got {}",
                learning_rate
            )));
        }

        let std_dev = 1.0 / (hidden_size as f64).sqrt();
        let init = Normal::new(0.0, std_dev)
            .map_err(|e| ForecastError::InvalidParameter(format!("Weight init: {}", e)))?;
        let mut rng = rand::thread_rng();

        Ok(Self {
            window_size,
            hidden_size,
            learning_rate,
            wx: Array1::from_shape_fn(hidden_size, |_| init.sample(&mut rng)),
            wh: Array2::from_shape_fn((hidden_size, hidden_size), |_| init.sample(&mut rng)),
            bh: Array1::zeros(hidden_size),
            wo: Array1::from_shape_fn(hidden_size, |_| init.sample(&mut rng)),
            bo: 0.0,
        })
    }

    /// Expected input window length
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Train on windowed pairs for a fixed number of epochs
    ///
    /// `on_epoch` is invoked once after every completed epoch with the
    /// zero-based epoch index; the caller decides what progress reporting
    /// to hang off it. Samples are visited in their given (chronological)
    /// order every epoch. Returns the mean training loss of the final
    /// epoch.
    pub fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[f64],
        epochs: usize,
        on_epoch: &mut dyn FnMut(usize),
    ) -> Result<f64> {
        if epochs == 0 {
            return Err(ForecastError::InvalidParameter(
                "Epochs must be at least 1".to_string(),
            ));
        }
        if inputs.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if inputs.len() != targets.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Inputs length ({}) doesn't match targets length ({})",
                inputs.len(),
                targets.len()
            )));
        }
        for window in inputs {
            if window.len() != self.window_size {
                return Err(ForecastError::InvalidParameter(format!(
                    "Input window of length {} does not match model window size {}",
                    window.len(),
                    self.window_size
                )));
            }
        }

        let mut last_epoch_loss = 0.0;
        for epoch in 0..epochs {
            let mut total_loss = 0.0;
            for (window, &target) in inputs.iter().zip(targets.iter()) {
                total_loss += self.sgd_step(window, target);
            }
            last_epoch_loss = total_loss / inputs.len() as f64;
            on_epoch(epoch);
        }

        Ok(last_epoch_loss)
    }

    /// Predict the next scaled value from a full window
    pub fn predict_one(&self, window: &[f64]) -> Result<f64> {
        if window.len() != self.window_size {
            return Err(ForecastError::InsufficientHistory {
                required: self.window_size,
                actual: window.len(),
            });
        }
        let (_, output) = self.forward(window);
        Ok(output)
    }

    /// Forward pass; returns hidden states (index 0 is the zero pre-state)
    /// and the output scalar
    fn forward(&self, window: &[f64]) -> (Vec<Array1<f64>>, f64) {
        let mut states = Vec::with_capacity(window.len() + 1);
        states.push(Array1::zeros(self.hidden_size));

        for &x in window {
            let prev = states.last().unwrap();
            let pre = &(&self.wx * x) + &self.wh.dot(prev) + &self.bh;
            states.push(pre.mapv(f64::tanh));
        }

        let last = states.last().unwrap();
        let output = self.wo.dot(last) + self.bo;
        (states, output)
    }

    /// One BPTT + SGD update on a single sample; returns the sample loss
    fn sgd_step(&mut self, window: &[f64], target: f64) -> f64 {
        let (states, output) = self.forward(window);
        let err = output - target;
        let loss = 0.5 * err * err;

        let steps = window.len();
        let mut g_wx = Array1::<f64>::zeros(self.hidden_size);
        let mut g_wh = Array2::<f64>::zeros((self.hidden_size, self.hidden_size));
        let mut g_bh = Array1::<f64>::zeros(self.hidden_size);
        let g_wo = &states[steps] * err;
        let g_bo = err;

        // Backpropagate through time from the last step
        let mut d_hidden = &self.wo * err;
        for t in (0..steps).rev() {
            let h_t = &states[t + 1];
            let h_prev = &states[t];
            // d(pre-activation) through tanh'
            let d_pre = &d_hidden * &h_t.mapv(|v| 1.0 - v * v);

            g_wx.scaled_add(window[t], &d_pre);
            g_wh += &d_pre
                .view()
                .insert_axis(Axis(1))
                .dot(&h_prev.view().insert_axis(Axis(0)));
            g_bh += &d_pre;

            d_hidden = self.wh.t().dot(&d_pre);
        }

        // Global gradient-norm clipping
        let norm_sq = g_wx.mapv(|v| v * v).sum()
            + g_wh.mapv(|v| v * v).sum()
            + g_bh.mapv(|v| v * v).sum()
            + g_wo.mapv(|v| v * v).sum()
            + g_bo * g_bo;
        let norm = norm_sq.sqrt();
        let scale = if norm > GRAD_CLIP {
            GRAD_CLIP / norm
        } else {
            1.0
        };

        let step = -self.learning_rate * scale;
        self.wx.scaled_add(step, &g_wx);
        self.wh.scaled_add(step, &g_wh);
        self.bh.scaled_add(step, &g_bh);
        self.wo.scaled_add(step, &g_wo);
        self.bo += step * g_bo;

        loss
    }
}
