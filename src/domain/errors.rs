use thiserror::Error;

/// Errors surfaced by the signal engine.
///
/// `InsufficientHistory`, `InsufficientData` and `ModelNotFound` are
/// recoverable (fetch more bars, wait for data, retrain); the orchestrator
/// picks the recovery strategy. `IncompleteFeatures` indicates a contract
/// violation upstream of prediction and is never retried.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("insufficient history: need {required} bars, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("insufficient training data: need {required} labeled examples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("feature vector at ts {timestamp} is missing required fields")]
    IncompleteFeatures { timestamp: i64 },

    #[error("model artifact not found at {path}")]
    ModelNotFound { path: String },

    #[error("model training failed: {reason}")]
    Training { reason: String },

    #[error("model prediction failed: {reason}")]
    Prediction { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_history_formatting() {
        let err = SignalError::InsufficientHistory {
            required: 200,
            actual: 37,
        };
        let msg = err.to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains("37"));
    }

    #[test]
    fn test_model_not_found_formatting() {
        let err = SignalError::ModelNotFound {
            path: "data/model.json".to_string(),
        };
        assert!(err.to_string().contains("data/model.json"));
    }
}
