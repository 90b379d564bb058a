//! Fixed texts of the symptom page and its result cards.

pub const BUTTON_IDLE: &str = "Analyze Symptoms";
pub const BUTTON_BUSY: &str = "Analyzing...";

pub const SUCCESS_HEADER: &str = "AI Analysis Complete";
pub const CONDITION_LABEL: &str = "Potential Condition";
pub const ACTION_LABEL: &str = "Recommended Action";
pub const FAILURE_HEADER: &str = "Analysis Failed";

pub const SYMPTOMS_PLACEHOLDER: &str = "Type to search for symptoms...";
pub const SEARCH_PLACEHOLDER: &str = "Type here...";
