use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;

const LABEL_COLUMN: &str = "prognosis";

/// Training rows in indicator form, symptoms kept in file column order.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub symptoms: Vec<String>,
    pub rows: Vec<TrainingRow>,
}

#[derive(Debug, Clone)]
pub struct TrainingRow {
    pub disease: String,
    pub features: Vec<bool>,
}

impl TrainingSet {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let label_idx = headers
            .iter()
            .position(|h| h.trim() == LABEL_COLUMN)
            .ok_or_else(|| anyhow!("Column '{}' not found", LABEL_COLUMN))?;

        // Trailing index columns written by spreadsheet exports carry no data
        let feature_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, name)| {
                let name = name.trim();
                *idx != label_idx && !name.is_empty() && !name.starts_with("Unnamed:")
            })
            .map(|(idx, name)| (idx, name.trim().to_string()))
            .collect();

        if feature_columns.is_empty() {
            return Err(anyhow!("No symptom columns found"));
        }

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let disease = record
                .get(label_idx)
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .ok_or_else(|| anyhow!("Row {}: empty {}", line + 2, LABEL_COLUMN))?
                .to_string();

            let features = feature_columns
                .iter()
                .map(|(idx, name)| parse_indicator(record.get(*idx).unwrap_or("")).ok_or_else(|| {
                    anyhow!("Row {}: invalid value for '{}'", line + 2, name)
                }))
                .collect::<Result<Vec<_>>>()?;

            rows.push(TrainingRow { disease, features });
        }

        if rows.is_empty() {
            return Err(anyhow!("Training data has no rows"));
        }

        Ok(Self {
            symptoms: feature_columns.into_iter().map(|(_, name)| name).collect(),
            rows,
        })
    }
}

fn parse_indicator(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "0" | "0.0" => Some(false),
        "1" | "1.0" => Some(true),
        _ => None,
    }
}
