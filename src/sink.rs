//! Write-only CSV sink for produced forecasts

use crate::error::Result;
use crate::models::ForecastResult;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists forecasts as timestamped CSV files for audit and monitoring
///
/// Fire-and-forget from the pipeline's perspective: nothing in the crate
/// ever reads these files back.
#[derive(Debug, Clone)]
pub struct CsvForecastSink {
    dir: PathBuf,
}

impl CsvForecastSink {
    /// Open a sink rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Write one forecast to `{symbol}_predictions_{version}_{timestamp}.csv`
    ///
    /// `real_values`, when given, must align with the forecast dates;
    /// missing actuals are written as empty cells.
    pub fn persist(
        &self,
        symbol: &str,
        forecast: &ForecastResult,
        real_values: Option<&[f64]>,
        version: &str,
    ) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let file_name = format!("{}_predictions_{}_{}.csv", symbol, version, timestamp);
        let path = self.dir.join(file_name);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["date", "real", "predicted"])?;
        for (i, (date, predicted)) in forecast.iter().enumerate() {
            let real = real_values
                .and_then(|reals| reals.get(i))
                .map(|v| v.to_string())
                .unwrap_or_default();
            writer.write_record([date.to_string(), real, predicted.to_string()])?;
        }
        writer.flush()?;

        tracing::info!(symbol, path = %path.display(), "Forecast persisted");
        Ok(path)
    }
}
