//! Decision fusion: model prediction x news sentiment -> trade signal.

use crate::domain::types::Signal;

/// Pure, total fusion rule. Both comparisons are strict, so at the default
/// threshold of zero a flat news day never trades.
#[derive(Debug, Clone, Copy)]
pub struct DecisionPolicy {
    pub sentiment_threshold: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            sentiment_threshold: 0.0,
        }
    }
}

impl DecisionPolicy {
    pub fn new(sentiment_threshold: f64) -> Self {
        Self {
            sentiment_threshold,
        }
    }

    pub fn decide(&self, prediction: u32, sentiment: f64) -> Signal {
        if prediction == 1 && sentiment > self.sentiment_threshold {
            Signal::BuyCall
        } else if prediction == 0 && sentiment < -self.sentiment_threshold {
            Signal::BuyPut
        } else {
            Signal::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table_at_default_threshold() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.decide(1, 0.5), Signal::BuyCall);
        assert_eq!(policy.decide(0, -0.5), Signal::BuyPut);
        assert_eq!(policy.decide(1, -0.5), Signal::None);
        assert_eq!(policy.decide(0, 0.5), Signal::None);
    }

    #[test]
    fn zero_sentiment_never_trades() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.decide(1, 0.0), Signal::None);
        assert_eq!(policy.decide(0, 0.0), Signal::None);
    }

    #[test]
    fn threshold_widens_the_no_trade_band() {
        let policy = DecisionPolicy::new(0.3);
        assert_eq!(policy.decide(1, 0.3), Signal::None);
        assert_eq!(policy.decide(1, 0.31), Signal::BuyCall);
        assert_eq!(policy.decide(0, -0.3), Signal::None);
        assert_eq!(policy.decide(0, -0.31), Signal::BuyPut);
    }
}
