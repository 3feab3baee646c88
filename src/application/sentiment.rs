//! Headline sentiment aggregation.
//!
//! The per-headline polarity function is pluggable (the default VADER
//! scorer lives in `infrastructure::news`); this module only owns the
//! aggregation contract: arithmetic mean, 0.0 for an empty day.

/// Capability: score one headline in [-1, 1].
pub type PolarityFn = dyn Fn(&str) -> f64 + Send + Sync;

pub struct SentimentAggregator {
    polarity: Box<PolarityFn>,
}

impl SentimentAggregator {
    pub fn new(polarity: Box<PolarityFn>) -> Self {
        Self { polarity }
    }

    /// Mean polarity across `headlines`. An empty set is a valid news day
    /// and scores exactly 0.0.
    pub fn aggregate(&self, headlines: &[String]) -> f64 {
        if headlines.is_empty() {
            return 0.0;
        }
        let total: f64 = headlines.iter().map(|h| (self.polarity)(h)).sum();
        total / headlines.len() as f64
    }
}
