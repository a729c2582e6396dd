//! Pipeline configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters for training and inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input window length for the sequence model
    pub window_size: usize,
    /// Hidden units in the recurrent layer
    pub hidden_size: usize,
    /// SGD learning rate
    pub learning_rate: f64,
    /// Chronological train/validation split ratio
    pub train_ratio: f64,
    /// Version tag stamped on saved artifacts
    pub model_version: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 60,
            hidden_size: 32,
            learning_rate: 0.05,
            train_ratio: 0.8,
            model_version: "v1".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}
