use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Server not configured properly. Please contact support.")]
    NotConfigured,

    #[error("Please select at least one symptom to analyze.")]
    NoSymptoms,

    #[error("Could not read the submitted form.")]
    MalformedForm,

    #[error("An internal error occurred during analysis.")]
    Model(#[source] anyhow::Error),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoSymptoms | Self::MalformedForm => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
