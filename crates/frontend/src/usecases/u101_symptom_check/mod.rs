pub mod api;
pub mod controller;
pub mod form_fields;
pub mod render;
pub mod selector;
pub mod transport;
pub mod view;

pub use view::SymptomCheckPage;
