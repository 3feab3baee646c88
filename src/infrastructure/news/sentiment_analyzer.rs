//! Headline polarity scoring using VADER.
//!
//! VADER's general lexicon misses a fair amount of market jargon ("rally",
//! "beats estimates", "sell-off"), so the compound score is nudged by a
//! small financial keyword table before clamping to [-1, 1]. This is the
//! default polarity function plugged into the sentiment aggregator.

use crate::application::sentiment::PolarityFn;
use vader_sentiment::SentimentIntensityAnalyzer;

const BULLISH_KEYWORDS: &[(&str, f64)] = &[
    ("rally", 0.4),
    ("rallies", 0.4),
    ("surge", 0.4),
    ("surges", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("record high", 0.4),
    ("all-time high", 0.5),
    ("beats estimates", 0.4),
    ("beat expectations", 0.4),
    ("upgrade", 0.3),
    ("upgraded", 0.3),
    ("bullish", 0.5),
    ("rebound", 0.3),
    ("rebounds", 0.3),
    ("rate cut", 0.3),
    ("soft landing", 0.3),
    ("strong earnings", 0.4),
];

const BEARISH_KEYWORDS: &[(&str, f64)] = &[
    ("crash", -0.5),
    ("crashes", -0.5),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("sell-off", -0.4),
    ("selloff", -0.4),
    ("recession", -0.4),
    ("bearish", -0.5),
    ("misses estimates", -0.4),
    ("missed expectations", -0.4),
    ("downgrade", -0.3),
    ("downgraded", -0.3),
    ("rate hike", -0.2),
    ("inflation fears", -0.3),
    ("default", -0.4),
    ("layoffs", -0.3),
    ("tumble", -0.4),
    ("tumbles", -0.4),
    ("slump", -0.3),
    ("slumps", -0.3),
];

/// Scores one headline in [-1, 1]. Construction parses the VADER lexicon,
/// so build it once and reuse.
pub struct SentimentAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn financial_boost(&self, text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let mut boost = 0.0;
        for (keyword, score) in BULLISH_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score;
            }
        }
        for (keyword, score) in BEARISH_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score; // already negative
            }
        }
        boost
    }

    /// VADER compound score plus half the keyword boost, clamped to [-1, 1].
    /// Blank text scores 0.0.
    pub fn analyze(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        let compound = scores["compound"];
        (compound + self.financial_boost(text) * 0.5).clamp(-1.0, 1.0)
    }

    /// Package as the aggregator's pluggable polarity capability.
    pub fn into_polarity_fn(self) -> Box<PolarityFn> {
        Box::new(move |headline| self.analyze(headline))
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullish_headlines_score_positive() {
        let analyzer = SentimentAnalyzer::new();
        let headlines = [
            "S&P 500 rallies to record high on strong earnings",
            "Stocks surge as chipmaker beats estimates",
            "Markets rebound after upbeat jobs report",
        ];
        for headline in headlines {
            let score = analyzer.analyze(headline);
            assert!(score > 0.0, "expected bullish score for '{headline}', got {score}");
        }
    }

    #[test]
    fn bearish_headlines_score_negative() {
        let analyzer = SentimentAnalyzer::new();
        let headlines = [
            "Stocks plunge as recession fears deepen",
            "Market sell-off accelerates after surprise rate hike",
            "Shares tumble on widening layoffs",
        ];
        for headline in headlines {
            let score = analyzer.analyze(headline);
            assert!(score < 0.0, "expected bearish score for '{headline}', got {score}");
        }
    }

    #[test]
    fn blank_text_scores_zero() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.analyze(""), 0.0);
        assert_eq!(analyzer.analyze("   "), 0.0);
    }

    #[test]
    fn score_is_clamped() {
        let analyzer = SentimentAnalyzer::new();
        let piled_on = "Stocks crash, plunge and tumble in devastating sell-off as recession \
                        fears and layoffs spark a terrible, horrible market collapse";
        let score = analyzer.analyze(piled_on);
        assert!((-1.0..=1.0).contains(&score));
    }
}
