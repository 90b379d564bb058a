use serde::{Deserialize, Serialize};

/// Shown whenever a request fails without an application-level message.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Body of a `/predict` answer.
///
/// The JSON carries no tag: an object with an `error` field is a failure,
/// an object with `prediction` and `suggestion` is a success. When both are
/// present the error wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Failure {
        error: String,
    },
    Success {
        prediction: String,
        suggestion: String,
        /// Percentage in `0.0..=100.0`, two decimals.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<f64>,
    },
}

impl PredictionResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }

    pub fn generic_failure() -> Self {
        Self::failure(GENERIC_ERROR_MESSAGE)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}
