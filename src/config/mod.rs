//! Configuration for the daily signal pipeline.
//!
//! Everything is loaded from environment variables into one explicit struct
//! and passed by value into the orchestrator and backtester; no component
//! reads ambient globals mid-run. `profit_target`, `stop_loss` and
//! `option_expiry_days` are accepted for the execution gateway's bracket
//! parameters only and never reach the decision rule.

use crate::application::model::TrainOptions;
use crate::domain::types::FeatureWindows;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: String,
    /// How many bars of history to request from the bar source.
    pub history_bars: usize,
    pub model_path: PathBuf,

    // Indicator windows
    pub rsi_window: usize,
    pub ma_fast_window: usize,
    pub ma_slow_window: usize,

    // Decision fusion
    pub sentiment_threshold: f64,

    // Training
    pub train_test_fraction: f64,
    pub estimator_count: u16,

    // Bracket pass-through for the execution gateway
    pub profit_target: f64,
    pub stop_loss: f64,
    pub option_expiry_days: u32,
    pub order_quantity: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            history_bars: 500,
            model_path: PathBuf::from("data/model.json"),
            rsi_window: 14,
            ma_fast_window: 50,
            ma_slow_window: 200,
            sentiment_threshold: 0.0,
            train_test_fraction: 0.2,
            estimator_count: 100,
            profit_target: 0.5,
            stop_loss: 0.3,
            option_expiry_days: 7,
            order_quantity: 1.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            symbol: env::var("SYMBOL").unwrap_or(defaults.symbol),
            history_bars: parse_var("HISTORY_BARS", defaults.history_bars)?,
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            rsi_window: parse_var("RSI_WINDOW", defaults.rsi_window)?,
            ma_fast_window: parse_var("MA_FAST_WINDOW", defaults.ma_fast_window)?,
            ma_slow_window: parse_var("MA_SLOW_WINDOW", defaults.ma_slow_window)?,
            sentiment_threshold: parse_var("SENTIMENT_THRESHOLD", defaults.sentiment_threshold)?,
            train_test_fraction: parse_var("TRAIN_TEST_FRACTION", defaults.train_test_fraction)?,
            estimator_count: parse_var("ESTIMATOR_COUNT", defaults.estimator_count)?,
            profit_target: parse_var("PROFIT_TARGET", defaults.profit_target)?,
            stop_loss: parse_var("STOP_LOSS", defaults.stop_loss)?,
            option_expiry_days: parse_var("OPTION_EXPIRY_DAYS", defaults.option_expiry_days)?,
            order_quantity: parse_var("ORDER_QUANTITY", defaults.order_quantity)?,
        })
    }

    pub fn windows(&self) -> FeatureWindows {
        FeatureWindows {
            fast: self.ma_fast_window,
            slow: self.ma_slow_window,
            rsi: self.rsi_window,
        }
    }

    pub fn train_options(&self) -> TrainOptions {
        TrainOptions {
            test_fraction: self.train_test_fraction,
            estimator_count: self.estimator_count,
            seed: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("failed to parse {key}={raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = Config::default();
        assert_eq!(config.rsi_window, 14);
        assert_eq!(config.ma_fast_window, 50);
        assert_eq!(config.ma_slow_window, 200);
        assert_eq!(config.sentiment_threshold, 0.0);
        assert_eq!(config.train_test_fraction, 0.2);
        assert_eq!(config.estimator_count, 100);
        assert_eq!(config.windows().warmup(), 200);
    }
}
