use contracts::usecases::u101_symptom_check::{SymptomListResponse, SYMPTOMS_ENDPOINT};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Symptom keys the model was trained on, in column order.
pub async fn fetch_symptoms() -> Result<Vec<String>, String> {
    let response = Request::get(&api_url(SYMPTOMS_ENDPOINT))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Loading symptoms failed: {}", response.status()));
    }

    response
        .json::<SymptomListResponse>()
        .await
        .map(|r| r.symptoms)
        .map_err(|e| format!("Failed to parse response: {}", e))
}
