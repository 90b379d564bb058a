use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use contracts::usecases::u101_symptom_check::{PREDICT_ENDPOINT, SYMPTOMS_ENDPOINT};

use crate::shared::app_state::SharedState;
use crate::{handlers, system};

/// API routes of the application; static hosting and outer layers are
/// added in `main`.
pub fn configure_routes(state: SharedState) -> Router {
    // Routes behind a valid session token
    let protected = Router::new()
        .route(PREDICT_ENDPOINT, post(handlers::u101_symptom_check::predict))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/signup",
            post(system::handlers::auth::signup),
        )
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        // ========================================
        // U101 SYMPTOM CHECK
        // ========================================
        .route(
            SYMPTOMS_ENDPOINT,
            get(handlers::u101_symptom_check::list_symptoms),
        )
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::AppState;
    use crate::system::auth::jwt::AuthKeys;
    use crate::usecases::u101_predict_disease::service::tests::sample_checker;
    use crate::usecases::u101_predict_disease::SymptomChecker;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use contracts::usecases::u101_symptom_check::{PredictionResult, SymptomListResponse};
    use tower::ServiceExt;

    const BOUNDARY: &str = "----symptomformboundary";

    fn test_app(checker: SymptomChecker) -> (Router, String) {
        let keys = AuthKeys::new("route-test-secret");
        let token = keys.generate_access_token("user-1", "alice").expect("token");
        (configure_routes(AppState::new(checker, keys)), token)
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn predict_request(token: Option<&str>, fields: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::post(PREDICT_ENDPOINT).header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
            .body(Body::from(multipart_body(fields)))
            .expect("request")
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = test_app(sample_checker());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn symptoms_are_listed_in_training_order() {
        let (app, _) = test_app(sample_checker());
        let response = app
            .oneshot(
                Request::get(SYMPTOMS_ENDPOINT)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let list: SymptomListResponse = json_body(response).await;
        assert_eq!(list.symptoms[0], "fever");
        assert_eq!(list.symptoms.len(), 5);
    }

    #[tokio::test]
    async fn predict_returns_diagnosis_for_selected_symptoms() {
        let (app, token) = test_app(sample_checker());
        let request = predict_request(
            Some(&token),
            &[("symptoms", "fever"), ("symptoms", "cough"), ("notes", "since monday")],
        );
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let result: PredictionResult = json_body(response).await;
        match result {
            PredictionResult::Success {
                prediction,
                suggestion,
                confidence,
            } => {
                assert_eq!(prediction, "Flu");
                assert_eq!(suggestion, "Rest and hydrate.");
                assert!(confidence.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn predict_without_session_is_rejected_with_json_error() {
        let (app, _) = test_app(sample_checker());
        let response = app
            .oneshot(predict_request(None, &[("symptoms", "fever")]))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let result: PredictionResult = json_body(response).await;
        assert_eq!(result, PredictionResult::failure("Authentication required."));
    }

    #[tokio::test]
    async fn predict_with_foreign_token_is_rejected() {
        let (app, _) = test_app(sample_checker());
        let foreign = AuthKeys::new("other-secret")
            .generate_access_token("user-2", "mallory")
            .expect("token");
        let response = app
            .oneshot(predict_request(Some(&foreign), &[("symptoms", "fever")]))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn predict_without_symptoms_is_a_bad_request() {
        let (app, token) = test_app(sample_checker());
        let response = app
            .oneshot(predict_request(Some(&token), &[("notes", "feeling off")]))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let result: PredictionResult = json_body(response).await;
        assert_eq!(
            result,
            PredictionResult::failure("Please select at least one symptom to analyze.")
        );
    }

    #[tokio::test]
    async fn predict_on_unconfigured_server_reports_it() {
        let (app, token) = test_app(SymptomChecker::unconfigured());
        let response = app
            .oneshot(predict_request(Some(&token), &[("symptoms", "fever")]))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let result: PredictionResult = json_body(response).await;
        assert_eq!(
            result,
            PredictionResult::failure("Server not configured properly. Please contact support.")
        );
    }

    #[tokio::test]
    async fn predict_with_json_body_is_a_malformed_form() {
        let (app, token) = test_app(sample_checker());
        let request = Request::post(PREDICT_ENDPOINT)
            .header("content-type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(r#"{"symptoms":["fever"]}"#))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let result: PredictionResult = json_body(response).await;
        assert!(result.is_failure());
    }
}
