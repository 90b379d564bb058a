use serde::{Deserialize, Serialize};

/// Endpoint receiving the symptom form as `multipart/form-data`.
pub const PREDICT_ENDPOINT: &str = "/predict";

/// Endpoint listing the symptom keys the model knows about.
pub const SYMPTOMS_ENDPOINT: &str = "/api/symptoms";

/// Multi-select field; one form entry per selected symptom.
pub const FIELD_SYMPTOMS: &str = "symptoms";

/// Free-text description field.
pub const FIELD_NOTES: &str = "notes";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomListResponse {
    pub symptoms: Vec<String>,
}
