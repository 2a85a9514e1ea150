use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};

use crate::{
    error::{Result, ScalerError},
    models::AccessTokenResponse,
};

/// Source of fresh access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_access_token(&self) -> Result<String>;
}

/// Exchanges an API key for a short-lived access token.
pub struct ApiKeyTokenProvider {
    client: Client,
    refresh_url: String,
    api_key: String,
}

impl ApiKeyTokenProvider {
    pub fn new(client: Client, refresh_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            refresh_url: refresh_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for ApiKeyTokenProvider {
    async fn fetch_access_token(&self) -> Result<String> {
        tracing::debug!("Refreshing access token from {}", self.refresh_url);

        let response = self
            .client
            .post(&self.refresh_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ScalerError::Auth(format!("Access token request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            return Err(ScalerError::Auth(format!(
                "Failed to refresh the access token. status: {}, text: {}",
                status.as_u16(),
                text
            )));
        }

        let body: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| ScalerError::Auth(format!("Failed to parse access token response: {}", e)))?;

        Ok(body.access_token)
    }
}
