use std::sync::Arc;

use coach_api::CoachApiConfig;

use crate::backend::CoachBackend;

mod http;
mod mock;

pub use http::HttpCoachBackend;
pub use mock::MockCoachBackend;

pub const DEFAULT_BACKEND_ID: &str = "http";
pub const BACKEND_ENV_VAR: &str = "EVELYN_BACKEND";
pub const BASE_URL_ENV_VAR: &str = "EVELYN_API_BASE_URL";
pub const USER_ID_ENV_VAR: &str = "EVELYN_USER_ID";

pub fn backend_from_env() -> Result<Arc<dyn CoachBackend>, String> {
    let backend_id = trimmed_env(BACKEND_ENV_VAR);
    backend_for_id(backend_id.as_deref().unwrap_or(DEFAULT_BACKEND_ID))
}

pub fn backend_for_id(backend_id: &str) -> Result<Arc<dyn CoachBackend>, String> {
    match backend_id {
        "http" => Ok(Arc::new(HttpCoachBackend::new(api_config_from_env())?)),
        "mock" => Ok(Arc::new(MockCoachBackend::default())),
        unknown => Err(format!(
            "Unsupported backend '{unknown}'. Available backends: http, mock"
        )),
    }
}

pub fn api_config_from_env() -> CoachApiConfig {
    let mut config = CoachApiConfig::default();
    if let Some(base_url) = trimmed_env(BASE_URL_ENV_VAR) {
        config.base_url = coach_api::normalize_api_url(&base_url);
    }
    if let Some(user_id) = trimmed_env(USER_ID_ENV_VAR) {
        config.user_id = user_id;
    }
    config
}

fn trimmed_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
