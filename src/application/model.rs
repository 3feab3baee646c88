//! Trainable direction classifier.
//!
//! A `DirectionModel` is an immutable value produced by `train` or `load`;
//! retraining builds a new value rather than mutating in place, so one
//! loaded model can serve any number of concurrent readers.

use crate::domain::errors::SignalError;
use crate::domain::ports::DirectionPredictor;
use crate::domain::types::{FeatureVector, LabeledExample};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Below this many labeled examples a random forest is noise.
pub const MIN_TRAINING_EXAMPLES: usize = 50;

type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Training knobs. `seed` pins smartcore's RNG for reproducible runs; left
/// unset, two trainings over the same data may differ.
#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    /// Trailing fraction of examples held out for the accuracy estimate.
    pub test_fraction: f64,
    pub estimator_count: u16,
    pub seed: Option<u64>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            estimator_count: 100,
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct DirectionModel {
    forest: Forest,
}

impl DirectionModel {
    /// Train a forest over time-ordered examples and report held-out
    /// accuracy.
    ///
    /// The split is chronological with the trailing `test_fraction` held
    /// out; shuffling would leak future bars into the training slice. When
    /// the holdout ends up empty the accuracy is measured on the training
    /// slice instead.
    pub fn train(
        examples: &[LabeledExample],
        opts: &TrainOptions,
    ) -> Result<(Self, f64), SignalError> {
        if examples.len() < MIN_TRAINING_EXAMPLES {
            return Err(SignalError::InsufficientData {
                required: MIN_TRAINING_EXAMPLES,
                actual: examples.len(),
            });
        }

        let mut x: Vec<Vec<f64>> = Vec::with_capacity(examples.len());
        let mut y: Vec<u32> = Vec::with_capacity(examples.len());
        for ex in examples {
            let row = ex
                .features
                .to_row()
                .ok_or(SignalError::IncompleteFeatures {
                    timestamp: ex.features.timestamp,
                })?;
            x.push(row);
            y.push(ex.label);
        }

        let holdout = (examples.len() as f64 * opts.test_fraction).floor() as usize;
        let split = examples.len() - holdout;

        let x_train = DenseMatrix::from_2d_vec(&x[..split].to_vec()).map_err(|e| {
            SignalError::Training {
                reason: e.to_string(),
            }
        })?;
        let y_train = y[..split].to_vec();

        let mut params =
            RandomForestClassifierParameters::default().with_n_trees(opts.estimator_count);
        if let Some(seed) = opts.seed {
            params = params.with_seed(seed);
        }

        let forest =
            Forest::fit(&x_train, &y_train, params).map_err(|e| SignalError::Training {
                reason: e.to_string(),
            })?;
        let model = Self { forest };

        let (x_eval, y_eval) = if holdout > 0 {
            (&x[split..], &y[split..])
        } else {
            (&x[..], &y[..])
        };
        let accuracy = model.accuracy(x_eval, y_eval)?;
        info!(
            train = split,
            test = holdout,
            accuracy,
            "direction model trained"
        );

        Ok((model, accuracy))
    }

    fn accuracy(&self, x: &[Vec<f64>], y: &[u32]) -> Result<f64, SignalError> {
        let matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(|e| SignalError::Prediction {
            reason: e.to_string(),
        })?;
        let predicted = self
            .forest
            .predict(&matrix)
            .map_err(|e| SignalError::Prediction {
                reason: e.to_string(),
            })?;
        let hits = predicted
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        Ok(hits as f64 / y.len() as f64)
    }

    /// Serialize the trained forest to `path` as JSON. The format only has
    /// to round-trip losslessly for prediction; it is not a wire contract.
    pub fn save(&self, path: &Path) -> Result<(), SignalError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SignalError::Training {
                    reason: format!("creating {}: {e}", parent.display()),
                })?;
            }
        }
        let file = File::create(path).map_err(|e| SignalError::Training {
            reason: format!("creating {}: {e}", path.display()),
        })?;
        serde_json::to_writer(file, &self.forest).map_err(|e| SignalError::Training {
            reason: format!("serializing model: {e}"),
        })?;
        info!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    /// Load a previously saved forest. A missing artifact surfaces as
    /// `ModelNotFound` so the caller can decide whether to retrain.
    pub fn load(path: &Path) -> Result<Self, SignalError> {
        if !path.exists() {
            return Err(SignalError::ModelNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path).map_err(|e| SignalError::ModelNotFound {
            path: format!("{}: {e}", path.display()),
        })?;
        let forest =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| SignalError::Prediction {
                reason: format!("deserializing model: {e}"),
            })?;
        Ok(Self { forest })
    }
}

impl DirectionPredictor for DirectionModel {
    /// Predict the direction class for one feature vector. All three fields
    /// must be present; a partial vector means the feature pipeline was
    /// bypassed.
    fn predict(&self, features: &FeatureVector) -> Result<u32, SignalError> {
        let row = features.to_row().ok_or(SignalError::IncompleteFeatures {
            timestamp: features.timestamp,
        })?;
        let matrix =
            DenseMatrix::from_2d_vec(&vec![row]).map_err(|e| SignalError::Prediction {
                reason: e.to_string(),
            })?;
        let predictions = self
            .forest
            .predict(&matrix)
            .map_err(|e| SignalError::Prediction {
                reason: e.to_string(),
            })?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| SignalError::Prediction {
                reason: "empty prediction batch".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::features;
    use crate::domain::types::{FeatureWindows, PriceBar};

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

    fn rising_examples(n_bars: usize) -> Vec<LabeledExample> {
        let closes: Vec<f64> = (0..n_bars).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);
        let windows = FeatureWindows {
            fast: 3,
            slow: 5,
            rsi: 3,
        };
        let fv = features::compute(&bars, &windows).unwrap();
        features::label_examples(&bars, &fv)
    }

    fn seeded() -> TrainOptions {
        TrainOptions {
            seed: Some(42),
            ..TrainOptions::default()
        }
    }

    #[test]
    fn too_few_examples_is_insufficient_data() {
        let examples = rising_examples(20);
        let err = DirectionModel::train(&examples, &seeded()).unwrap_err();
        assert!(matches!(err, SignalError::InsufficientData { .. }));
    }

    #[test]
    fn rising_market_trains_accurately() {
        let examples = rising_examples(120);
        let (_, accuracy) = DirectionModel::train(&examples, &seeded()).unwrap();
        assert!(accuracy >= 0.9, "accuracy {accuracy} below 0.9");
    }

    #[test]
    fn incomplete_vector_is_rejected_at_prediction() {
        let examples = rising_examples(120);
        let (model, _) = DirectionModel::train(&examples, &seeded()).unwrap();
        let partial = FeatureVector {
            timestamp: 7,
            rsi: None,
            ma_fast: Some(100.0),
            ma_slow: Some(101.0),
        };
        let err = model.predict(&partial).unwrap_err();
        assert!(matches!(
            err,
            SignalError::IncompleteFeatures { timestamp: 7 }
        ));
    }

    #[test]
    fn fixed_seed_reproduces_predictions() {
        let examples = rising_examples(120);
        let (a, _) = DirectionModel::train(&examples, &seeded()).unwrap();
        let (b, _) = DirectionModel::train(&examples, &seeded()).unwrap();
        for ex in &examples {
            assert_eq!(
                a.predict(&ex.features).unwrap(),
                b.predict(&ex.features).unwrap()
            );
        }
    }

    #[test]
    fn missing_artifact_is_model_not_found() {
        let path = std::env::temp_dir().join(format!("optionsignal-{}.json", uuid::Uuid::new_v4()));
        let err = DirectionModel::load(&path).unwrap_err();
        assert!(matches!(err, SignalError::ModelNotFound { .. }));
    }
}
