use contracts::usecases::u101_symptom_check::{PredictionResult, PREDICT_ENDPOINT};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::controller::{PredictTransport, SubmitError};
use super::form_fields::FormFields;
use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

/// Maps a finished HTTP exchange to a prediction result.
///
/// An `{error}` body is an application message and passes through on any
/// status. Any other body on a non-2xx status, or a body that is not a
/// prediction result at all, is a transport failure.
pub fn interpret_response(status: u16, body: &str) -> Result<PredictionResult, SubmitError> {
    let decoded = serde_json::from_str::<PredictionResult>(body);

    match decoded {
        Ok(result) if (200..300).contains(&status) || result.is_failure() => Ok(result),
        Ok(_) => Err(SubmitError::Status(status)),
        Err(_) if !(200..300).contains(&status) => Err(SubmitError::Status(status)),
        Err(e) => Err(SubmitError::Decode(e.to_string())),
    }
}

/// Posts the form as `multipart/form-data` through `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, fields: &FormFields) -> Result<(u16, String), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        // The browser sets the multipart boundary itself
        opts.set_body(&fields.to_form_data()?.into());

        let request = Request::new_with_str_and_init(&api_url(PREDICT_ENDPOINT), &opts)?;
        if let Some(token) = storage::get_access_token() {
            request
                .headers()
                .set("Authorization", &format!("Bearer {}", token))?;
        }

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;
        let text = JsFuture::from(resp.text()?).await?;

        Ok((resp.status(), text.as_string().unwrap_or_default()))
    }
}

impl PredictTransport for FetchTransport {
    async fn predict(&self, fields: FormFields) -> Result<PredictionResult, SubmitError> {
        let (status, body) = self
            .send(&fields)
            .await
            .map_err(|e| SubmitError::Network(format!("{:?}", e)))?;

        interpret_response(status, &body)
    }
}
