//! Feature computation over a raw bar sequence.
//!
//! Emits one vector per bar once every indicator window has filled, so the
//! feature sequence is a contiguous suffix of the bar sequence starting at
//! index `warmup - 1`. Nothing is zero-filled; bars inside the warmup are
//! dropped.

use crate::domain::errors::SignalError;
use crate::domain::types::{FeatureVector, FeatureWindows, LabeledExample, PriceBar};
use ta::Next;
use ta::indicators::SimpleMovingAverage;

/// Compute the feature sequence for `bars`. Pure: no side effects, same
/// output for the same input.
///
/// Fails with `InsufficientHistory` when fewer than `windows.warmup()` bars
/// are supplied, so the result always holds at least one vector.
pub fn compute(
    bars: &[PriceBar],
    windows: &FeatureWindows,
) -> Result<Vec<FeatureVector>, SignalError> {
    let warmup = windows.warmup();
    if bars.len() < warmup {
        return Err(SignalError::InsufficientHistory {
            required: warmup,
            actual: bars.len(),
        });
    }

    let mut ma_fast =
        SimpleMovingAverage::new(windows.fast).expect("window lengths must be non-zero");
    let mut ma_slow =
        SimpleMovingAverage::new(windows.slow).expect("window lengths must be non-zero");

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let mut out = Vec::with_capacity(bars.len() - (warmup - 1));

    for (i, bar) in bars.iter().enumerate() {
        let fast = ma_fast.next(bar.close);
        let slow = ma_slow.next(bar.close);
        if i + 1 < warmup {
            continue;
        }
        let rsi = wilder_rsi(&closes[i + 1 - windows.rsi..=i]);
        out.push(FeatureVector {
            timestamp: bar.timestamp,
            rsi: Some(rsi),
            ma_fast: Some(fast),
            ma_slow: Some(slow),
        });
    }

    Ok(out)
}

/// Wilder-style RSI over the `window.len()` bars ending at the current bar.
/// Average gain and loss are taken over the window's close-to-close deltas.
/// A window with no losses reads 100 (this also covers constant prices,
/// avoiding the divide-by-zero).
fn wilder_rsi(window: &[f64]) -> f64 {
    let mut gain = 0.0;
    let mut loss = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta >= 0.0 {
            gain += delta;
        } else {
            loss -= delta;
        }
    }
    if loss == 0.0 {
        return 100.0;
    }
    let steps = (window.len() - 1) as f64;
    let rs = (gain / steps) / (loss / steps);
    100.0 - 100.0 / (1.0 + rs)
}

/// Pair each feature vector with its direction label: 1 iff the next bar's
/// close is strictly greater. The final vector has no next bar and is
/// excluded rather than guessed.
pub fn label_examples(bars: &[PriceBar], features: &[FeatureVector]) -> Vec<LabeledExample> {
    if features.is_empty() {
        return Vec::new();
    }
    let offset = bars.len() - features.len();
    features
        .iter()
        .enumerate()
        .take(features.len() - 1)
        .map(|(i, fv)| {
            let bar_idx = offset + i;
            let label = u32::from(bars[bar_idx + 1].close > bars[bar_idx].close);
            LabeledExample {
                features: *fv,
                label,
            }
        })
        .collect()
}
