pub mod request;
pub mod response;
pub mod ui;

pub use request::{SymptomListResponse, FIELD_NOTES, FIELD_SYMPTOMS, PREDICT_ENDPOINT, SYMPTOMS_ENDPOINT};
pub use response::{PredictionResult, GENERIC_ERROR_MESSAGE};

use crate::usecases::common::UseCaseMetadata;

pub struct SymptomCheck;

impl UseCaseMetadata for SymptomCheck {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "symptom_check"
    }

    fn display_name() -> &'static str {
        "Symptom Checker"
    }

    fn description() -> &'static str {
        "Predicts a likely condition from the selected symptoms and suggests a next step"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(SymptomCheck::full_name(), "u101_symptom_check");
    }
}
