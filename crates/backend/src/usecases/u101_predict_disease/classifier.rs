use anyhow::{anyhow, Result};

use super::dataset::TrainingSet;

/// Laplace smoothing applied to every symptom/disease count.
const ALPHA: f64 = 1.0;

/// Bernoulli naive Bayes over symptom indicators.
#[derive(Debug, Clone)]
pub struct DiagnosisModel {
    classes: Vec<ClassProfile>,
    feature_count: usize,
}

#[derive(Debug, Clone)]
struct ClassProfile {
    disease: String,
    log_prior: f64,
    /// ln P(symptom present | disease)
    log_present: Vec<f64>,
    /// ln P(symptom absent | disease)
    log_absent: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    /// Posterior of the winning class in percent, two decimals.
    pub confidence: f64,
}

impl DiagnosisModel {
    /// Classes keep the order of their first appearance in the data; ties go
    /// to the earlier one.
    pub fn fit(set: &TrainingSet) -> Result<Self> {
        let feature_count = set.symptoms.len();
        let mut diseases: Vec<String> = Vec::new();
        let mut totals: Vec<usize> = Vec::new();
        let mut counts: Vec<Vec<usize>> = Vec::new();

        for row in &set.rows {
            if row.features.len() != feature_count {
                return Err(anyhow!(
                    "Row for '{}' has {} features, expected {}",
                    row.disease,
                    row.features.len(),
                    feature_count
                ));
            }

            let class_idx = match diseases.iter().position(|d| *d == row.disease) {
                Some(idx) => idx,
                None => {
                    diseases.push(row.disease.clone());
                    totals.push(0);
                    counts.push(vec![0; feature_count]);
                    diseases.len() - 1
                }
            };

            totals[class_idx] += 1;
            for (count, present) in counts[class_idx].iter_mut().zip(&row.features) {
                if *present {
                    *count += 1;
                }
            }
        }

        if diseases.is_empty() {
            return Err(anyhow!("Cannot fit a model without training rows"));
        }

        let row_total = set.rows.len() as f64;
        let classes = diseases
            .into_iter()
            .zip(totals)
            .zip(counts)
            .map(|((disease, total), counts)| {
                let denominator = total as f64 + 2.0 * ALPHA;
                let (log_present, log_absent) = counts
                    .iter()
                    .map(|&c| {
                        let p = (c as f64 + ALPHA) / denominator;
                        (p.ln(), (1.0 - p).ln())
                    })
                    .unzip();
                ClassProfile {
                    disease,
                    log_prior: (total as f64 / row_total).ln(),
                    log_present,
                    log_absent,
                }
            })
            .collect();

        Ok(Self {
            classes,
            feature_count,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.disease.as_str())
    }

    pub fn predict(&self, features: &[bool]) -> Result<Diagnosis> {
        if features.len() != self.feature_count {
            return Err(anyhow!(
                "Expected {} features, got {}",
                self.feature_count,
                features.len()
            ));
        }

        let scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                class.log_prior
                    + features
                        .iter()
                        .enumerate()
                        .map(|(j, &present)| {
                            if present {
                                class.log_present[j]
                            } else {
                                class.log_absent[j]
                            }
                        })
                        .sum::<f64>()
            })
            .collect();

        let (best_idx, best_score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (idx, score)| {
                if score > best.1 {
                    (idx, score)
                } else {
                    best
                }
            });

        // Softmax normalised around the best score to stay finite
        let normaliser: f64 = scores.iter().map(|s| (s - best_score).exp()).sum();
        let posterior = 1.0 / normaliser;

        Ok(Diagnosis {
            disease: self.classes[best_idx].disease.clone(),
            confidence: (posterior * 100.0 * 100.0).round() / 100.0,
        })
    }
}
