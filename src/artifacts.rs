//! Persisted (model, scaler) artifacts, one current pair per symbol

use crate::error::{ForecastError, Result};
use crate::models::RecurrentNet;
use crate::scaling::MinMaxScaler;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Model file payload: the network plus the version tag it was saved under
#[derive(Debug, Serialize, Deserialize)]
struct StoredModel {
    version: String,
    model: RecurrentNet,
}

/// File-backed store binding a trained model to its normalization state
///
/// A model is only meaningful with the scaler it was trained against, so
/// the store saves and loads the two as one unit and treats a partial
/// pair on disk as absent. Each symbol has exactly one current artifact;
/// saving overwrites.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn model_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}_model.json", symbol))
    }

    fn scaler_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}_scaler.json", symbol))
    }

    /// Persist a trained pair for a symbol, overwriting any existing pair
    pub fn save(
        &self,
        symbol: &str,
        model: &RecurrentNet,
        scaler: &MinMaxScaler,
        version: &str,
    ) -> Result<PathBuf> {
        let model_path = self.model_path(symbol);
        let stored = StoredModel {
            version: version.to_string(),
            model: model.clone(),
        };
        fs::write(&model_path, serde_json::to_vec(&stored)?)?;
        fs::write(self.scaler_path(symbol), serde_json::to_vec(scaler)?)?;

        tracing::info!(symbol, version, path = %model_path.display(), "Saved artifact pair");
        Ok(model_path)
    }

    /// Load the current pair for a symbol
    ///
    /// Fails with `ArtifactMissing` when either file is absent.
    pub fn load(&self, symbol: &str) -> Result<(RecurrentNet, MinMaxScaler)> {
        let model_path = self.model_path(symbol);
        let scaler_path = self.scaler_path(symbol);

        if !model_path.exists() || !scaler_path.exists() {
            return Err(ForecastError::ArtifactMissing {
                symbol: symbol.to_string(),
            });
        }

        let stored: StoredModel = serde_json::from_slice(&fs::read(&model_path)?)?;
        let scaler: MinMaxScaler = serde_json::from_slice(&fs::read(&scaler_path)?)?;
        Ok((stored.model, scaler))
    }

    /// Whether a complete pair exists for a symbol
    pub fn exists(&self, symbol: &str) -> bool {
        self.model_path(symbol).exists() && self.scaler_path(symbol).exists()
    }
}
