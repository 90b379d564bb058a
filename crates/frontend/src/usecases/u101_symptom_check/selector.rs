//! Searchable multi-select over the native `<select multiple>`.
//!
//! The widget is the Choices library loaded by `index.html`. It keeps the
//! underlying `<select>` in sync, so the form's own encoding still sees the
//! chosen values.

use contracts::usecases::u101_symptom_check::ui::{SEARCH_PLACEHOLDER, SYMPTOMS_PLACEHOLDER};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlSelectElement;

#[wasm_bindgen]
extern "C" {
    type Choices;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &HtmlSelectElement, config: &JsValue) -> Result<Choices, JsValue>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoicesConfig {
    pub remove_item_button: bool,
    pub placeholder: bool,
    pub placeholder_value: String,
    pub search_placeholder_value: String,
    /// Option labels come from the server and are shown as plain text.
    #[serde(rename = "allowHTML")]
    pub allow_html: bool,
}

impl Default for ChoicesConfig {
    fn default() -> Self {
        Self {
            remove_item_button: true,
            placeholder: true,
            placeholder_value: SYMPTOMS_PLACEHOLDER.to_string(),
            search_placeholder_value: SEARCH_PLACEHOLDER.to_string(),
            allow_html: false,
        }
    }
}

/// Turns the plain select into the search widget. Without the library the
/// native control stays usable, so a missing global is only a warning.
pub fn mount_selector(select: &HtmlSelectElement) {
    let has_choices = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Choices"))
        .unwrap_or(false);
    if !has_choices {
        log::warn!("Choices is not loaded; keeping the native symptom list");
        return;
    }

    let config = match serde_wasm_bindgen::to_value(&ChoicesConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to encode selector config: {}", e);
            return;
        }
    };

    if let Err(e) = Choices::new(select, &config) {
        log::error!("Failed to mount symptom selector: {:?}", e);
    }
}

/// `"skin_rash"` → `"Skin Rash"`.
pub fn symptom_label(key: &str) -> String {
    key.split('_')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_keys() {
        let json = serde_json::to_value(ChoicesConfig::default()).unwrap();

        assert_eq!(json["removeItemButton"], true);
        assert_eq!(json["placeholder"], true);
        assert_eq!(json["placeholderValue"], "Type to search for symptoms...");
        assert_eq!(json["searchPlaceholderValue"], "Type here...");
        assert_eq!(json["allowHTML"], false);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_symptom_label() {
        assert_eq!(symptom_label("skin_rash"), "Skin Rash");
        assert_eq!(symptom_label("itching"), "Itching");
        assert_eq!(symptom_label("dischromic _patches"), "Dischromic Patches");
        assert_eq!(symptom_label(""), "");
    }
}
