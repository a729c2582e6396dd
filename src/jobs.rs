//! Training job lifecycle: status records, status store and orchestrator

use crate::artifacts::ArtifactStore;
use crate::config::PipelineConfig;
use crate::data::SeriesSource;
use crate::error::{ForecastError, Result};
use crate::metrics::{evaluate, ValidationMetrics};
use crate::models::RecurrentNet;
use crate::scaling::MinMaxScaler;
use crate::utils::train_validation_split;
use crate::windowing::make_sequences;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;

/// Terminal and non-terminal training job states
///
/// `InProgress` transitions to exactly one of `Completed` or `Failed`;
/// both are terminal. A fresh job for the same symbol replaces the record
/// outright rather than resuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InProgress,
    Completed,
    Failed,
}

/// Per-symbol training job state, readable while the job runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub status: JobStatus,
    /// Percentage complete, 0..=100; monotonically non-decreasing until a
    /// terminal state is written
    pub progress: u8,
    pub epochs: usize,
    /// Present only on completed jobs
    pub metrics: Option<ValidationMetrics>,
    /// Failure reason, present only on failed jobs
    pub error: Option<String>,
}

impl JobRecord {
    fn in_progress(epochs: usize) -> Self {
        Self {
            status: JobStatus::InProgress,
            progress: 0,
            epochs,
            metrics: None,
            error: None,
        }
    }
}

/// Process-wide training status table, keyed by symbol
///
/// An explicit injected object shared by the orchestrator and status
/// queries; all mutation goes through the inner lock so readers never see
/// a torn record. One live record per symbol: registering a new job
/// replaces whatever was there.
#[derive(Debug, Clone, Default)]
pub struct StatusStore {
    records: Arc<RwLock<HashMap<String, JobRecord>>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, JobRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a fresh in-progress record, replacing any prior one
    pub fn register(&self, symbol: &str, epochs: usize) {
        self.write()
            .insert(symbol.to_string(), JobRecord::in_progress(epochs));
    }

    /// Update progress for a running job
    pub fn set_progress(&self, symbol: &str, progress: u8) {
        if let Some(record) = self.write().get_mut(symbol) {
            record.progress = progress;
        }
    }

    /// Mark a job completed with its validation metrics
    pub fn complete(&self, symbol: &str, metrics: Option<ValidationMetrics>) {
        if let Some(record) = self.write().get_mut(symbol) {
            record.status = JobStatus::Completed;
            record.progress = 100;
            record.metrics = metrics;
        }
    }

    /// Mark a job failed, retaining the reason
    pub fn fail(&self, symbol: &str, message: String) {
        if let Some(record) = self.write().get_mut(symbol) {
            record.status = JobStatus::Failed;
            record.progress = 0;
            record.error = Some(message);
        }
    }

    /// Current record for a symbol
    pub fn get(&self, symbol: &str) -> Result<JobRecord> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(symbol)
            .cloned()
            .ok_or_else(|| ForecastError::JobNotFound {
                symbol: symbol.to_string(),
            })
    }
}

/// Runs one training job per symbol as a fire-and-forget background task
///
/// The status store is the only channel back to callers: every failure
/// inside a job is caught at this boundary and recorded, never propagated
/// as a process-level error.
pub struct TrainingOrchestrator {
    source: Arc<dyn SeriesSource>,
    artifacts: ArtifactStore,
    status: StatusStore,
    config: PipelineConfig,
}

impl TrainingOrchestrator {
    pub fn new(
        source: Arc<dyn SeriesSource>,
        artifacts: ArtifactStore,
        status: StatusStore,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            artifacts,
            status,
            config,
        }
    }

    /// Start a training job for a symbol; returns immediately
    ///
    /// The record is registered before the task is spawned, so a status
    /// query issued right after this call always finds it. A second call
    /// for the same symbol replaces the record and, eventually, the
    /// artifact; the in-flight job is not cancelled.
    pub fn start_training(
        &self,
        symbol: &str,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        epochs: usize,
    ) -> JoinHandle<()> {
        self.status.register(symbol, epochs);

        let source = Arc::clone(&self.source);
        let artifacts = self.artifacts.clone();
        let status = self.status.clone();
        let config = self.config.clone();
        let symbol = symbol.to_string();
        let ticker = ticker.to_string();

        tokio::spawn(async move {
            tracing::info!(%symbol, %ticker, %start, %end, epochs, "Training job started");
            match run_job(&source, &artifacts, &status, &config, &symbol, &ticker, start, end, epochs)
                .await
            {
                Ok(metrics) => {
                    status.complete(&symbol, metrics);
                    tracing::info!(%symbol, "Training job completed");
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!(%symbol, error = %message, "Training job failed");
                    status.fail(&symbol, message);
                }
            }
        })
    }

    /// Current job record for a symbol; fails for never-started symbols
    pub fn get_status(&self, symbol: &str) -> Result<JobRecord> {
        self.status.get(symbol)
    }
}

/// Job body: fetch, normalize, window, split, train, evaluate, persist
#[allow(clippy::too_many_arguments)]
async fn run_job(
    source: &Arc<dyn SeriesSource>,
    artifacts: &ArtifactStore,
    status: &StatusStore,
    config: &PipelineConfig,
    symbol: &str,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    epochs: usize,
) -> Result<Option<ValidationMetrics>> {
    let series = source.fetch(ticker, start, end).await?;
    if series.is_empty() {
        return Err(ForecastError::DataUnavailable(format!(
            "No rows for {} ({}) between {} and {}",
            symbol, ticker, start, end
        )));
    }

    let closes = series.closes();
    let scaler = MinMaxScaler::fit(&closes)?;
    let scaled = scaler.transform(&closes);

    let (inputs, targets) = make_sequences(&scaled, config.window_size)?;
    let (train_inputs, train_targets, val_inputs, val_targets) =
        train_validation_split(inputs, targets, config.train_ratio)?;

    let model = RecurrentNet::new(config.window_size, config.hidden_size, config.learning_rate)?;

    // The fitting loop is a long blocking computation; per-epoch progress
    // writes are its only interaction with shared state.
    let progress_status = status.clone();
    let progress_symbol = symbol.to_string();
    let (model, final_loss) = tokio::task::spawn_blocking(move || {
        let mut model = model;
        let mut on_epoch = |epoch: usize| {
            let progress = (((epoch + 1) as f64 / epochs as f64) * 100.0).round() as u8;
            progress_status.set_progress(&progress_symbol, progress);
        };
        let loss = model.fit(&train_inputs, &train_targets, epochs, &mut on_epoch)?;
        Ok::<_, ForecastError>((model, loss))
    })
    .await
    .map_err(|e| ForecastError::DataError(format!("Training task aborted: {}", e)))??;

    tracing::info!(symbol, final_loss, "Model fitting finished");

    // Small date ranges can leave the validation partition empty; the job
    // still completes, just without metrics.
    let metrics = if val_targets.is_empty() {
        None
    } else {
        let predictions: Vec<f64> = val_inputs
            .iter()
            .map(|window| model.predict_one(window))
            .collect::<Result<_>>()?;
        Some(evaluate(&val_targets, &predictions)?)
    };

    artifacts.save(symbol, &model, &scaler, &config.model_version)?;

    Ok(metrics)
}
