//! Wire types shared by the symptom-checker frontend and backend.

pub mod system;
pub mod usecases;
