use contracts::usecases::u101_symptom_check::ui::{
    ACTION_LABEL, CONDITION_LABEL, FAILURE_HEADER, SUCCESS_HEADER,
};
use contracts::usecases::u101_symptom_check::{PredictionResult, GENERIC_ERROR_MESSAGE};

/// Markup of the single result card for `result`.
///
/// Server text is always escaped; only the surrounding structure and the
/// header icons are literal markup.
pub fn card_markup(result: &PredictionResult) -> String {
    match result {
        PredictionResult::Failure { error } => {
            let message = if error.trim().is_empty() {
                GENERIC_ERROR_MESSAGE
            } else {
                error.as_str()
            };
            format!(
                r#"<div class="glass-card result-card error">
    <div class="result-header">
        <i class="ph ph-warning-circle"></i>
        <span>{}</span>
    </div>
    <div class="result-body">
        <p class="error-message">{}</p>
    </div>
</div>"#,
                FAILURE_HEADER,
                html_escape(message)
            )
        }
        PredictionResult::Success {
            prediction,
            suggestion,
            confidence,
        } => {
            let confidence_line = confidence
                .map(|c| format!("\n        <p class=\"confidence\">Confidence: {:.2}%</p>", c))
                .unwrap_or_default();
            format!(
                r#"<div class="glass-card result-card">
    <div class="result-header">
        <i class="ph ph-first-aid-kit"></i>
        <span>{}</span>
    </div>
    <div class="result-body">
        <h3 class="result-title">{}</h3>
        <h2>{}</h2>{}
        <p class="suggestion-title">{}</p>
        <p>{}</p>
    </div>
</div>"#,
                SUCCESS_HEADER,
                CONDITION_LABEL,
                html_escape(prediction),
                confidence_line,
                ACTION_LABEL,
                html_escape(suggestion)
            )
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
