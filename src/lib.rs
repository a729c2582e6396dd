//! # Stock Forecast
//!
//! A Rust library for forecasting daily stock closing prices with a
//! recurrent sequence model, exposing training and inference as
//! asynchronous jobs.
//!
//! ## Features
//!
//! - Min-max normalization with exact inverse (persisted per symbol)
//! - Supervised windowing of scaled series into training pairs
//! - Recurrent network trained with backpropagation through time
//! - Background training jobs with per-epoch progress tracking
//! - Autoregressive N-step forecasting from a trailing window
//! - File-backed artifact store binding each model to its scaler
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use stock_forecast::artifacts::ArtifactStore;
//! use stock_forecast::config::PipelineConfig;
//! use stock_forecast::data::CsvSeriesSource;
//! use stock_forecast::forecast::ForecastEngine;
//! use stock_forecast::jobs::{StatusStore, TrainingOrchestrator};
//!
//! # async fn run() -> stock_forecast::error::Result<()> {
//! let artifacts = ArtifactStore::new("data/models")?;
//! let orchestrator = TrainingOrchestrator::new(
//!     Arc::new(CsvSeriesSource::new("data/prices")),
//!     artifacts.clone(),
//!     StatusStore::new(),
//!     PipelineConfig::default(),
//! );
//!
//! // Fire-and-forget: poll get_status for progress
//! let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let handle = orchestrator.start_training("TSLA", "TSLA", start, end, 20);
//! handle.await.ok();
//! println!("{:?}", orchestrator.get_status("TSLA")?);
//!
//! // Inference is synchronous once an artifact exists
//! let engine = ForecastEngine::new(artifacts);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod jobs;
pub mod metrics;
pub mod models;
pub mod scaling;
pub mod sink;
pub mod utils;
pub mod windowing;

// Re-export commonly used types
pub use crate::artifacts::ArtifactStore;
pub use crate::config::PipelineConfig;
pub use crate::data::{PricePoint, PriceSeries, SeriesSource, SymbolTable};
pub use crate::error::ForecastError;
pub use crate::forecast::ForecastEngine;
pub use crate::jobs::{JobRecord, JobStatus, StatusStore, TrainingOrchestrator};
pub use crate::metrics::ValidationMetrics;
pub use crate::models::{ForecastResult, RecurrentNet};
pub use crate::scaling::MinMaxScaler;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
