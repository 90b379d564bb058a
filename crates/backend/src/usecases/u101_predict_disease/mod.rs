//! u101: predict a condition from the selected symptoms.
//!
//! The model is fitted at startup from `Training.csv` (one 0/1 column per
//! symptom plus `prognosis`); suggestions come from `medications.csv`.

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod medications;
pub mod service;

pub use error::PredictError;
pub use service::SymptomChecker;
