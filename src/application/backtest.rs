//! Bar-by-bar replay of the direction model with a one-bar holding period.

use crate::application::features;
use crate::domain::errors::SignalError;
use crate::domain::ports::DirectionPredictor;
use crate::domain::types::{BacktestResult, FeatureWindows, PriceBar};
use tracing::debug;

/// Replays a predictor over historical bars: an up prediction enters at the
/// current close and exits at the next close, compounding the returns.
///
/// Only the buy branch is simulated; down predictions record nothing. That
/// asymmetry is inherited behavior, kept on purpose until someone extends
/// the simulation to puts.
#[derive(Debug, Clone, Copy)]
pub struct BacktestSimulator {
    windows: FeatureWindows,
}

impl BacktestSimulator {
    pub fn new(windows: FeatureWindows) -> Self {
        Self { windows }
    }

    /// Pure aside from the returned value; errors from feature computation
    /// and prediction propagate unchanged.
    pub fn run(
        &self,
        bars: &[PriceBar],
        predictor: &dyn DirectionPredictor,
    ) -> Result<BacktestResult, SignalError> {
        let features = features::compute(bars, &self.windows)?;
        let offset = bars.len() - features.len();

        let mut trade_returns = Vec::new();
        for (i, fv) in features
            .iter()
            .enumerate()
            .take(features.len().saturating_sub(1))
        {
            if predictor.predict(fv)? != 1 {
                continue;
            }
            let bar_idx = offset + i;
            let entry = bars[bar_idx].close;
            // No bar left to exit on -> flat trade, not a dropped one.
            let exit = bars.get(bar_idx + 1).map_or(entry, |b| b.close);
            trade_returns.push((exit - entry) / entry);
        }

        let mut equity_curve = Vec::with_capacity(trade_returns.len() + 1);
        let mut equity = 1.0;
        equity_curve.push(equity);
        for r in &trade_returns {
            equity *= 1.0 + r;
            equity_curve.push(equity);
        }
        let total_return = equity - 1.0;

        debug!(
            trades = trade_returns.len(),
            total_return, "backtest complete"
        );

        Ok(BacktestResult {
            trade_returns,
            equity_curve,
            total_return,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FeatureVector;

    /// Predictor stub returning a fixed class.
    struct Always(u32);

    impl DirectionPredictor for Always {
        fn predict(&self, _features: &FeatureVector) -> Result<u32, SignalError> {
            Ok(self.0)
        }
    }

    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: i as i64,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000.0,
            })
            .collect()
    }

    fn simulator() -> BacktestSimulator {
        BacktestSimulator::new(FeatureWindows {
            fast: 2,
            slow: 3,
            rsi: 3,
        })
    }

    #[test]
    fn constant_prices_return_exactly_zero() {
        let bars = bars_from_closes(&[100.0; 10]);
        let result = simulator().run(&bars, &Always(1)).unwrap();
        assert_eq!(result.total_return, 0.0);
        assert!(result.trade_returns.iter().all(|&r| r == 0.0));
        assert!(result.equity_curve.iter().all(|&e| e == 1.0));
    }

    #[test]
    fn down_predictions_record_no_trades() {
        let bars = bars_from_closes(&[100.0, 102.0, 101.0, 103.0, 104.0, 103.0]);
        let result = simulator().run(&bars, &Always(0)).unwrap();
        assert!(result.trade_returns.is_empty());
        assert_eq!(result.equity_curve, vec![1.0]);
        assert_eq!(result.total_return, 0.0);
    }

    #[test]
    fn buy_every_bar_compounds_next_close_returns() {
        // Features start at bar 2; the last feature (bar 5) is skipped.
        let bars = bars_from_closes(&[100.0, 100.0, 100.0, 110.0, 99.0, 120.0]);
        let result = simulator().run(&bars, &Always(1)).unwrap();

        let expected = [
            110.0 / 100.0 - 1.0, // bar 2 -> 3
            99.0 / 110.0 - 1.0,  // bar 3 -> 4
            120.0 / 99.0 - 1.0,  // bar 4 -> 5
        ];
        assert_eq!(result.trade_returns.len(), expected.len());
        for (got, want) in result.trade_returns.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }

        let compounded: f64 = expected.iter().map(|r| 1.0 + r).product::<f64>() - 1.0;
        assert!((result.total_return - compounded).abs() < 1e-12);
        assert_eq!(result.equity_curve.len(), expected.len() + 1);
        assert_eq!(result.equity_curve[0], 1.0);
    }

    #[test]
    fn insufficient_history_propagates() {
        let bars = bars_from_closes(&[100.0, 101.0]);
        let err = simulator().run(&bars, &Always(1)).unwrap_err();
        assert!(matches!(err, SignalError::InsufficientHistory { .. }));
    }
}
