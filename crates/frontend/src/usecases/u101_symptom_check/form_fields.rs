use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{FormData, HtmlFormElement};

/// Ordered `(name, value)` pairs as the browser would encode the form.
///
/// Repeated names are kept in order: a multi-select posts one entry per
/// chosen option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All values submitted under `name`, in form order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Last value under `name`; scalar fields resolve this way.
    pub fn last(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Reads the current field values through the native form encoding.
    pub fn from_form(form: &HtmlFormElement) -> Result<Self, JsValue> {
        let data = FormData::new_with_form(form)?;
        let mut fields = Self::new();

        let iter = js_sys::try_iter(&data)?
            .ok_or_else(|| JsValue::from_str("FormData is not iterable"))?;
        for entry in iter {
            let pair: js_sys::Array = entry?.dyn_into()?;
            let name = pair.get(0).as_string().unwrap_or_default();
            // File inputs yield Blob values; only text fields are relevant here
            if let Some(value) = pair.get(1).as_string() {
                fields.push(name, value);
            }
        }

        Ok(fields)
    }

    pub fn to_form_data(&self) -> Result<FormData, JsValue> {
        let data = FormData::new()?;
        for (name, value) in &self.entries {
            data.append_with_str(name, value)?;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_names_keep_order() {
        let fields = FormFields::new()
            .with("symptoms", "itching")
            .with("notes", "since monday")
            .with("symptoms", "skin_rash");

        assert_eq!(
            fields.values("symptoms").collect::<Vec<_>>(),
            vec!["itching", "skin_rash"]
        );
        assert_eq!(fields.entries().len(), 3);
    }

    #[test]
    fn test_last_value_wins_for_scalar_lookup() {
        let fields = FormFields::new().with("notes", "a").with("notes", "b");

        assert_eq!(fields.last("notes"), Some("b"));
        assert_eq!(fields.last("missing"), None);
    }

    #[test]
    fn test_last_outlives_the_name_it_was_looked_up_with() {
        let fields = FormFields::new().with("notes", "since monday");

        let notes = {
            let name = String::from("notes");
            fields.last(&name)
        };

        assert_eq!(notes, Some("since monday"));
    }

    #[test]
    fn test_empty_form() {
        let fields = FormFields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.values("symptoms").count(), 0);
    }
}
