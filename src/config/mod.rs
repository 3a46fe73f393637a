use std::env;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub product_fetch_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_url = env::var("ROOTCRAFT_API_URL")
            .map_err(|_| AppError::Config("ROOTCRAFT_API_URL is not set".to_string()))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_token: env::var("ROOTCRAFT_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            request_timeout_secs: env::var("ROOTCRAFT_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            product_fetch_limit: env::var("ROOTCRAFT_PRODUCT_FETCH_LIMIT")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
