use std::env;

use crate::error::{Result, ScalerError};

pub const DEFAULT_REFRESH_URL: &str = "https://api.scaler.pics/auth/api-key-token";
pub const DEFAULT_SIGN_URL: &str = "https://sign.scaler.pics/sign";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalerConfig {
    pub refresh_url: String,
    pub sign_url: String,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            refresh_url: DEFAULT_REFRESH_URL.to_string(),
            sign_url: DEFAULT_SIGN_URL.to_string(),
        }
    }
}

impl ScalerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        ScalerConfig {
            refresh_url: env::var("REFRESH_URL")
                .unwrap_or_else(|_| DEFAULT_REFRESH_URL.to_string()),
            sign_url: env::var("SIGN_URL").unwrap_or_else(|_| DEFAULT_SIGN_URL.to_string()),
        }
    }
}

/// Reads `API_KEY`, loading `.env` first.
pub fn api_key_from_env() -> Result<String> {
    dotenvy::dotenv().ok();

    match env::var("API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ScalerError::Config("API_KEY must be set".to_string())),
    }
}
