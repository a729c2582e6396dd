//! Price series data handling and the external series-data seam

use crate::error::{ForecastError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A single daily observation: closing price for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered univariate daily close series
///
/// Dates are strictly increasing and all values are finite; both are
/// enforced at construction so downstream code never re-validates.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from observations, validating ordering and finiteness
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::DataError(format!(
                    "Dates must be strictly increasing: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        for point in &points {
            if !point.close.is_finite() {
                return Err(ForecastError::DataError(format!(
                    "Non-finite close value at {}",
                    point.date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Create a series from parallel date and close vectors
    pub fn from_parts(dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(ForecastError::DataError(format!(
                "Date and close lengths differ: {} vs {}",
                dates.len(),
                closes.len()
            )));
        }
        let points = dates
            .into_iter()
            .zip(closes)
            .map(|(date, close)| PricePoint { date, close })
            .collect();
        Self::new(points)
    }

    /// An empty series; the data source returns this when a range has no rows
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Close values in date order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Restrict to observations with `start <= date <= end`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let points = self
            .points
            .iter()
            .copied()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        Self { points }
    }
}

/// External source of raw price history
///
/// An empty series for a range is an `Ok` value, not an error; callers
/// decide whether emptiness is fatal.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;
}

/// Series source backed by per-ticker CSV files in a directory
///
/// Expects `{dir}/{ticker}.csv` with a date column and a close column. A
/// missing file behaves like an empty range, matching how a market-data
/// provider reports an unknown ticker.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    dir: PathBuf,
}

impl CsvSeriesSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load the full series for a ticker from its CSV file
    fn load_csv(&self, ticker: &str) -> Result<PriceSeries> {
        let path = self.dir.join(format!("{}.csv", ticker));
        if !path.exists() {
            tracing::warn!(ticker, path = %path.display(), "No CSV file for ticker");
            return Ok(PriceSeries::empty());
        }

        let file = File::open(&path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let date_column = Self::detect_date_column(&df)?;
        let close_column = Self::detect_close_column(&df)?;

        let dates = Self::column_as_dates(&df, &date_column)?;
        let closes = Self::column_as_f64(&df, &close_column)?;

        PriceSeries::from_parts(dates, closes)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower = name.to_lowercase();
            if lower.contains("date") || lower.contains("time") {
                return Ok(name.to_string());
            }
        }
        Err(ForecastError::DataError(
            "No date column found in CSV".to_string(),
        ))
    }

    /// Detect the close-price column in a DataFrame
    fn detect_close_column(df: &DataFrame) -> Result<String> {
        let names = df.get_column_names();
        for name in &names {
            if name.to_lowercase().contains("close") {
                return Ok(name.to_string());
            }
        }
        for name in &names {
            if name.to_lowercase().contains("price") {
                return Ok(name.to_string());
            }
        }
        Err(ForecastError::DataError(
            "No close column found in CSV".to_string(),
        ))
    }

    /// Parse a string column as ISO dates
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name)?;
        let strings = col.utf8().map_err(|e| {
            ForecastError::DataError(format!(
                "Column '{}' is not a string date column: {}",
                column_name, e
            ))
        })?;

        let mut dates = Vec::with_capacity(df.height());
        for value in strings.into_iter() {
            let raw = value.ok_or_else(|| {
                ForecastError::DataError(format!("Null date in column '{}'", column_name))
            })?;
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                ForecastError::DataError(format!("Unparseable date '{}': {}", raw, e))
            })?;
            dates.push(date);
        }
        Ok(dates)
    }

    /// Get a numeric column as f64 values
    fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
        let col = df.column(column_name)?;
        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().flatten().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            _ => Err(ForecastError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                column_name
            ))),
        }
    }
}

#[async_trait]
impl SeriesSource for CsvSeriesSource {
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let full = self.load_csv(ticker)?;
        Ok(full.between(start, end))
    }
}

/// Fixed mapping from logical symbols to market ticker strings
///
/// The pipeline treats the mapping as given; it never owns or mutates it
/// after construction.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    map: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    /// Resolve a logical symbol to its market ticker
    pub fn resolve(&self, symbol: &str) -> Option<&str> {
        self.map.get(symbol).map(String::as_str)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new([
            ("TSLA".to_string(), "TSLA".to_string()),
            ("BYD".to_string(), "BYDDY".to_string()),
            ("TOYOTA".to_string(), "TM".to_string()),
        ])
    }
}
