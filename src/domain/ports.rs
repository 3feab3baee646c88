use crate::domain::errors::SignalError;
use crate::domain::types::{FeatureVector, OrderIntent, PriceBar};
use anyhow::Result;
use async_trait::async_trait;

/// Supplies chronologically ordered bars for a symbol. Implementations own
/// their timeout/retry policy; the engine only requires ordering.
#[async_trait]
pub trait BarSource: Send + Sync {
    async fn fetch_bars(&self, symbol: &str, count: usize) -> Result<Vec<PriceBar>>;
}

/// Supplies raw headline text for the trading day. An empty result is a
/// valid day, not an error.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self) -> Result<Vec<String>>;
}

/// Accepts an order intent and reports success or failure. Order lifecycle
/// (fills, cancels) stays on the gateway side.
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    async fn submit(&self, intent: OrderIntent) -> Result<()>;
}

/// Read-only directional prediction over a complete feature vector.
/// Shared by the daily pipeline and the backtester, so multiple callers may
/// drive one loaded model concurrently.
pub trait DirectionPredictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<u32, SignalError>;
}
