use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_symptom_check::{PredictionResult, SymptomCheck};
use std::collections::HashMap;
use std::path::Path;

use super::classifier::DiagnosisModel;
use super::dataset::TrainingSet;
use super::error::PredictError;
use super::medications::MedicationTable;

/// Entry point of the use case. Holds nothing when startup loading failed;
/// every prediction then answers [`PredictError::NotConfigured`].
pub struct SymptomChecker {
    loaded: Option<Loaded>,
}

struct Loaded {
    symptoms: Vec<String>,
    index: HashMap<String, usize>,
    model: DiagnosisModel,
    medications: MedicationTable,
}

impl SymptomChecker {
    pub fn unconfigured() -> Self {
        Self { loaded: None }
    }

    pub fn from_parts(training: TrainingSet, medications: MedicationTable) -> anyhow::Result<Self> {
        let model = DiagnosisModel::fit(&training)?;
        let index = training
            .symptoms
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Ok(Self {
            loaded: Some(Loaded {
                symptoms: training.symptoms,
                index,
                model,
                medications,
            }),
        })
    }

    /// Loads both CSV files. Failures are logged and produce an unconfigured
    /// checker so the rest of the server keeps running.
    pub fn load(training_csv: &Path, medications_csv: &Path) -> Self {
        let name = SymptomCheck::full_name();

        let training = match TrainingSet::from_path(training_csv) {
            Ok(set) => {
                tracing::info!(
                    "[{}] Training data loaded: {} symptoms, {} rows",
                    name,
                    set.symptoms.len(),
                    set.rows.len()
                );
                set
            }
            Err(e) => {
                tracing::error!("[{}] Error loading training data: {:#}", name, e);
                return Self::unconfigured();
            }
        };

        let medications = match MedicationTable::from_path(medications_csv) {
            Ok(table) => {
                tracing::info!("[{}] Medications loaded: {} diseases", name, table.len());
                table
            }
            Err(e) => {
                tracing::error!("[{}] Error loading medications: {:#}", name, e);
                return Self::unconfigured();
            }
        };

        match Self::from_parts(training, medications) {
            Ok(checker) => checker,
            Err(e) => {
                tracing::error!("[{}] Error fitting model: {:#}", name, e);
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.loaded.is_some()
    }

    /// Known symptom keys in training column order; empty when unconfigured.
    pub fn symptoms(&self) -> &[String] {
        self.loaded
            .as_ref()
            .map(|l| l.symptoms.as_slice())
            .unwrap_or(&[])
    }

    /// Unknown symptom names are ignored; blank entries do not count as a
    /// selection.
    pub fn predict(&self, selected: &[String]) -> Result<PredictionResult, PredictError> {
        let loaded = self.loaded.as_ref().ok_or(PredictError::NotConfigured)?;

        let selected: Vec<&str> = selected
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if selected.is_empty() {
            return Err(PredictError::NoSymptoms);
        }

        let mut features = vec![false; loaded.symptoms.len()];
        for symptom in &selected {
            match loaded.index.get(*symptom) {
                Some(&idx) => features[idx] = true,
                None => tracing::debug!("Ignoring unknown symptom '{}'", symptom),
            }
        }

        let diagnosis = loaded.model.predict(&features).map_err(PredictError::Model)?;
        let suggestion = loaded.medications.suggestion_for(&diagnosis.disease).to_string();

        tracing::info!(
            "Predicted '{}' ({}%) from {} symptoms",
            diagnosis.disease,
            diagnosis.confidence,
            selected.len()
        );

        Ok(PredictionResult::Success {
            prediction: diagnosis.disease,
            suggestion,
            confidence: Some(diagnosis.confidence),
        })
    }
}
