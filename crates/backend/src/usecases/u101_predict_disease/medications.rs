use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_SUGGESTION: &str =
    "Please consult a healthcare professional for personalized advice.";

#[derive(Debug, Deserialize)]
struct MedicationRecord {
    #[serde(rename = "Disease")]
    disease: String,
    #[serde(rename = "Suggestion")]
    suggestion: String,
}

/// Suggested next step per disease, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MedicationTable {
    by_disease: HashMap<String, String>,
}

impl MedicationTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut by_disease = HashMap::new();
        for record in csv_reader.deserialize::<MedicationRecord>() {
            let record = record?;
            // First row for a disease wins
            by_disease
                .entry(record.disease.to_lowercase())
                .or_insert(record.suggestion);
        }
        Ok(Self { by_disease })
    }

    pub fn len(&self) -> usize {
        self.by_disease.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_disease.is_empty()
    }

    pub fn suggestion_for(&self, disease: &str) -> &str {
        self.by_disease
            .get(&disease.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(DEFAULT_SUGGESTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Disease,Suggestion
Flu,Rest and hydrate.
Fungal infection,\"Keep the skin dry, use antifungal cream.\"
flu,Duplicate that must be ignored.
";

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = MedicationTable::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(table.suggestion_for("FLU"), "Rest and hydrate.");
        assert_eq!(
            table.suggestion_for("fungal infection"),
            "Keep the skin dry, use antifungal cream."
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_disease_gets_default() {
        let table = MedicationTable::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(table.suggestion_for("Malaria"), DEFAULT_SUGGESTION);
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        assert!(MedicationTable::from_reader("Name,Advice\nFlu,Rest\n".as_bytes()).is_err());
    }
}
