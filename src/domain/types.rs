use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV observation for a fixed interval. Bar sequences are ordered by
/// strictly increasing timestamp and never mutated after ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Indicator lookback windows used by feature computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureWindows {
    pub fast: usize,
    pub slow: usize,
    pub rsi: usize,
}

impl FeatureWindows {
    /// Number of bars that must accumulate before the first complete
    /// feature vector can be emitted.
    pub fn warmup(&self) -> usize {
        self.fast.max(self.slow).max(self.rsi)
    }
}

impl Default for FeatureWindows {
    fn default() -> Self {
        Self {
            fast: 50,
            slow: 200,
            rsi: 14,
        }
    }
}

/// Indicator snapshot for a single bar. Fields are optional because a
/// windowed indicator has no defined value until its lookback fills; the
/// feature computer only ever emits fully populated vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub timestamp: i64,
    pub rsi: Option<f64>,
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
}

impl FeatureVector {
    pub fn is_complete(&self) -> bool {
        self.rsi.is_some() && self.ma_fast.is_some() && self.ma_slow.is_some()
    }

    /// Flatten into the model's input row. Returns `None` when any field is
    /// absent; the ordering here must stay in sync with training.
    pub fn to_row(&self) -> Option<Vec<f64>> {
        Some(vec![self.rsi?, self.ma_fast?, self.ma_slow?])
    }
}

/// A feature vector paired with its direction label: 1 when the next bar
/// closed strictly higher, 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledExample {
    pub features: FeatureVector,
    pub label: u32,
}

/// Fused directional recommendation for one evaluation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    BuyCall,
    BuyPut,
    None,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::BuyCall => write!(f, "BUY_CALL"),
            Signal::BuyPut => write!(f, "BUY_PUT"),
            Signal::None => write!(f, "NONE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Order request handed to the execution gateway. The engine never tracks
/// fill or lifecycle state; profit target, stop loss and expiry ride along
/// as bracket parameters for the gateway and are not consulted by the
/// decision rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntent {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub signal: Signal,
    pub quantity: f64,
    /// `None` means a market order.
    pub limit_price: Option<f64>,
    pub profit_target: f64,
    pub stop_loss: f64,
    pub expiry_days: u32,
}

/// Outcome of replaying the decision logic over a historical bar sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Per-trade simple returns, in entry order.
    pub trade_returns: Vec<f64>,
    /// Compounded equity, seeded at 1.0 before the first trade.
    pub equity_curve: Vec<f64>,
    pub total_return: f64,
}
