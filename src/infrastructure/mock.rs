//! Mock collaborators for mock-mode runs and end-to-end tests.

use crate::domain::ports::{BarSource, ExecutionGateway, HeadlineSource};
use crate::domain::types::{OrderIntent, PriceBar};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Deterministic synthetic daily bars: a fixed upward drift plus seeded
/// jitter smaller than the drift, so closes stay strictly increasing and a
/// freshly trained model has a clean signal to learn.
pub struct MockBarSource {
    start_price: f64,
    drift: f64,
    seed: u64,
}

impl MockBarSource {
    pub fn new(start_price: f64, drift: f64, seed: u64) -> Self {
        Self {
            start_price,
            drift,
            seed,
        }
    }

    pub fn trending() -> Self {
        Self::new(400.0, 0.5, 7)
    }
}

#[async_trait]
impl BarSource for MockBarSource {
    async fn fetch_bars(&self, symbol: &str, count: usize) -> Result<Vec<PriceBar>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut close = self.start_price;
        let mut bars = Vec::with_capacity(count);
        let first_day = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        for i in 0..count {
            let open = close;
            close += self.drift * (1.0 + rng.random_range(-0.8..0.8));
            bars.push(PriceBar {
                timestamp: (first_day + Duration::days(i as i64)).timestamp(),
                open,
                high: open.max(close) * 1.001,
                low: open.min(close) * 0.999,
                close,
                volume: rng.random_range(1.0e6..5.0e6),
            });
        }
        info!(symbol, count, "mock bar source generated history");
        Ok(bars)
    }
}

pub struct MockHeadlineSource {
    headlines: Vec<String>,
}

impl MockHeadlineSource {
    pub fn new(headlines: Vec<String>) -> Self {
        Self { headlines }
    }

    pub fn bullish() -> Self {
        Self::new(vec![
            "Stocks rally to record high on strong earnings".to_string(),
            "Fed signals rate cut as inflation cools".to_string(),
            "Tech shares surge after upbeat guidance".to_string(),
        ])
    }

    pub fn quiet() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl HeadlineSource for MockHeadlineSource {
    async fn fetch_headlines(&self) -> Result<Vec<String>> {
        Ok(self.headlines.clone())
    }
}

/// Records every submitted intent instead of talking to a broker.
#[derive(Clone, Default)]
pub struct RecordingExecutionGateway {
    intents: Arc<RwLock<Vec<OrderIntent>>>,
}

impl RecordingExecutionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submitted(&self) -> Vec<OrderIntent> {
        self.intents.read().await.clone()
    }
}

#[async_trait]
impl ExecutionGateway for RecordingExecutionGateway {
    async fn submit(&self, intent: OrderIntent) -> Result<()> {
        info!(id = %intent.id, signal = %intent.signal, "mock gateway accepted intent");
        self.intents.write().await.push(intent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_bars_are_strictly_increasing_and_deterministic() {
        let source = MockBarSource::trending();
        let a = source.fetch_bars("SPY", 50).await.unwrap();
        let b = source.fetch_bars("SPY", 50).await.unwrap();
        assert_eq!(a, b);
        for pair in a.windows(2) {
            assert!(pair[1].close > pair[0].close);
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
    }

    #[tokio::test]
    async fn recording_gateway_keeps_intents() {
        let gateway = RecordingExecutionGateway::new();
        assert!(gateway.submitted().await.is_empty());
    }
}
