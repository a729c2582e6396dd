//! End-to-end pipeline test: CSV source -> training job -> status ->
//! autoregressive forecast -> CSV sink

use chrono::{Duration, NaiveDate};
use std::io::Write;
use std::sync::Arc;
use stock_forecast::artifacts::ArtifactStore;
use stock_forecast::config::PipelineConfig;
use stock_forecast::data::{CsvSeriesSource, PriceSeries, SymbolTable};
use stock_forecast::forecast::ForecastEngine;
use stock_forecast::jobs::{JobStatus, StatusStore, TrainingOrchestrator};
use stock_forecast::sink::CsvForecastSink;
use tempfile::tempdir;

const WINDOW: usize = 12;

fn write_price_csv(dir: &std::path::Path, ticker: &str, days: usize) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut rows = Vec::with_capacity(days);
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        let close = 150.0 + i as f64 * 0.4 + (i as f64 * 0.2).sin() * 3.0;
        rows.push((date, close));
    }

    let mut file = std::fs::File::create(dir.join(format!("{}.csv", ticker))).unwrap();
    writeln!(file, "Date,Close").unwrap();
    for (date, close) in &rows {
        writeln!(file, "{},{}", date, close).unwrap();
    }
    rows
}

#[tokio::test]
async fn test_train_then_forecast_round_trip() {
    let prices_dir = tempdir().unwrap();
    let models_dir = tempdir().unwrap();
    let predictions_dir = tempdir().unwrap();

    let symbols = SymbolTable::default();
    let ticker = symbols.resolve("TSLA").unwrap();
    let rows = write_price_csv(prices_dir.path(), ticker, 100);

    let config = PipelineConfig {
        window_size: WINDOW,
        hidden_size: 8,
        learning_rate: 0.05,
        ..PipelineConfig::default()
    };
    let artifacts = ArtifactStore::new(models_dir.path()).unwrap();
    let orchestrator = TrainingOrchestrator::new(
        Arc::new(CsvSeriesSource::new(prices_dir.path())),
        artifacts.clone(),
        StatusStore::new(),
        config,
    );

    // Train over the full range and wait for the background job
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    orchestrator
        .start_training("TSLA", ticker, start, end, 6)
        .await
        .unwrap();

    let record = orchestrator.get_status("TSLA").unwrap();
    assert_eq!(record.status, JobStatus::Completed, "job: {:?}", record);
    assert_eq!(record.progress, 100);
    assert!(record.metrics.is_some());

    // Forecast from the trailing window of real observations
    let trailing = PriceSeries::new(
        rows.iter()
            .map(|&(date, close)| stock_forecast::data::PricePoint { date, close })
            .collect(),
    )
    .unwrap();

    let engine = ForecastEngine::new(artifacts);
    let forecast = engine.forecast("TSLA", 5, &trailing).unwrap();

    assert_eq!(forecast.horizon(), 5);
    let last_known = trailing.last_date().unwrap();
    for (i, (date, value)) in forecast.iter().enumerate() {
        assert_eq!(date, last_known + Duration::days(i as i64 + 1));
        assert!(value.is_finite());
    }

    // Persist the forecast for audit
    let sink = CsvForecastSink::new(predictions_dir.path()).unwrap();
    let path = sink.persist("TSLA", &forecast, None, "v1").unwrap();
    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents.lines().count(), 6);
}

#[tokio::test]
async fn test_forecast_before_training_fails() {
    let models_dir = tempdir().unwrap();
    let artifacts = ArtifactStore::new(models_dir.path()).unwrap();
    let engine = ForecastEngine::new(artifacts);

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let trailing = PriceSeries::from_parts(
        (0..WINDOW as i64).map(|i| start + Duration::days(i)).collect(),
        (0..WINDOW).map(|i| 100.0 + i as f64).collect(),
    )
    .unwrap();

    assert!(engine.forecast("TSLA", 5, &trailing).is_err());
}
