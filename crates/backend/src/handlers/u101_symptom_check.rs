use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_symptom_check::{SymptomCheck, SymptomListResponse, FIELD_SYMPTOMS};
use serde_json::json;

use crate::shared::app_state::SharedState;
use crate::system::auth::extractor::CurrentUser;
use crate::usecases::u101_predict_disease::PredictError;

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        if let Self::Model(e) = &self {
            tracing::error!("An error occurred during prediction: {:#}", e);
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /predict
///
/// Reads every `symptoms` entry of the multipart form; other fields are
/// accepted and ignored.
pub async fn predict(
    State(state): State<SharedState>,
    CurrentUser(claims): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, PredictError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected /predict body: {}", e);
        PredictError::MalformedForm
    })?;

    let mut selected = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed multipart field: {}", e);
        PredictError::MalformedForm
    })? {
        let is_symptom = field.name() == Some(FIELD_SYMPTOMS);
        let value = field
            .text()
            .await
            .map_err(|_| PredictError::MalformedForm)?;
        if is_symptom {
            selected.push(value);
        }
    }

    tracing::debug!(
        "[{}] User '{}' submitted {} symptoms",
        SymptomCheck::full_name(),
        claims.username,
        selected.len()
    );

    let result = state.checker.predict(&selected)?;
    Ok(Json(result).into_response())
}

/// GET /api/symptoms
pub async fn list_symptoms(State(state): State<SharedState>) -> Json<SymptomListResponse> {
    Json(SymptomListResponse {
        symptoms: state.checker.symptoms().to_vec(),
    })
}
