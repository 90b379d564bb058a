use std::sync::Arc;

use crate::system::auth::jwt::AuthKeys;
use crate::usecases::u101_predict_disease::SymptomChecker;

/// State shared by every request handler.
pub struct AppState {
    pub checker: SymptomChecker,
    pub auth: AuthKeys,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(checker: SymptomChecker, auth: AuthKeys) -> SharedState {
        Arc::new(Self { checker, auth })
    }
}
