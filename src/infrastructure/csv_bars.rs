//! CSV-backed bar source for offline training and backtesting.
//!
//! Expected header: `timestamp,open,high,low,close,volume`, rows in
//! chronological order.

use crate::domain::ports::BarSource;
use crate::domain::types::PriceBar;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening bar file {}", path.display()))?;
    let mut bars = Vec::new();
    for result in reader.deserialize() {
        let record: BarRecord =
            result.with_context(|| format!("parsing bar row in {}", path.display()))?;
        bars.push(PriceBar {
            timestamp: record.timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }
    Ok(bars)
}

/// `BarSource` over a local CSV file; `fetch_bars` returns the trailing
/// `count` rows.
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn fetch_bars(&self, _symbol: &str, count: usize) -> Result<Vec<PriceBar>> {
        let bars = load_bars(&self.path)?;
        let skip = bars.len().saturating_sub(count);
        Ok(bars[skip..].to_vec())
    }
}
