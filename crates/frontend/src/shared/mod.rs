pub mod api_utils;
pub mod flash;
pub mod spotlight;
