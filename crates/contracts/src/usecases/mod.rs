pub mod common;
pub mod u101_symptom_check;
