use reqwest::Client;
use std::{sync::Arc, time::Instant};

use crate::{
    auth::{ApiKeyTokenProvider, Credential, CredentialCache, TokenProvider},
    config::{self, ScalerConfig},
    error::{Result, ScalerError},
    models::{DestinationImage, TimeStats, TransformRequest, TransformResponse},
    services::{self, fan_out},
};

/// Client for the remote image transform service.
///
/// Clones share the HTTP connection pool and the cached access token.
#[derive(Clone)]
pub struct Scaler {
    client: Client,
    config: Arc<ScalerConfig>,
    credentials: Arc<CredentialCache>,
}

impl Scaler {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, ScalerConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: ScalerConfig) -> Self {
        let client = Client::new();
        let provider = ApiKeyTokenProvider::new(client.clone(), config.refresh_url.clone(), api_key);
        Self::with_token_provider(client, config, Arc::new(provider))
    }

    pub fn with_token_provider(
        client: Client,
        config: ScalerConfig,
        provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client,
            config: Arc::new(config),
            credentials: Arc::new(CredentialCache::new(provider)),
        }
    }

    /// Builds a client from `API_KEY`, `REFRESH_URL` and `SIGN_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = config::api_key_from_env()?;
        Ok(Self::with_config(api_key, ScalerConfig::from_env()))
    }

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    pub async fn ensure_valid_credential(&self) -> Result<Credential> {
        self.credentials.ensure_valid().await
    }

    /// Drops the cached access token so the next call refreshes it.
    pub async fn invalidate_credential(&self) {
        self.credentials.invalidate().await
    }

    pub async fn transform(&self, request: TransformRequest) -> Result<TransformResponse> {
        let wire_request = services::build_wire_request(&request)?;
        let credential = self.credentials.ensure_valid().await?;

        let start = Instant::now();
        let signed_url = services::request_signed_url(
            &self.client,
            &self.config.sign_url,
            &credential,
            &wire_request,
        )
        .await?;
        let sign_ms = elapsed_ms(start);

        let submit_start = Instant::now();
        let envelope = services::submit(&self.client, &signed_url, &request.source).await?;
        let submit_ms = elapsed_ms(submit_start);

        if envelope.destination_images.len() != request.destinations.len() {
            return Err(ScalerError::UnexpectedResponse(format!(
                "requested {} destinations, service returned {}",
                request.destinations.len(),
                envelope.destination_images.len()
            )));
        }

        let service_stats = envelope.time_stats;
        let upload_images_ms = service_stats.upload_images_ms.unwrap_or(0);
        let send_image_ms = submit_ms
            .saturating_sub(service_stats.transform_ms)
            .saturating_sub(upload_images_ms);

        let fan_out_start = Instant::now();
        let settled = services::resolve_outputs(
            &self.client,
            &envelope.destination_images,
            &request.destinations,
        )
        .await;
        // A reported zero means the service uploaded nothing.
        let get_images_ms = service_stats
            .upload_images_ms
            .filter(|ms| *ms > 0)
            .unwrap_or_else(|| elapsed_ms(fan_out_start));

        if let Some(delete_url) = envelope.delete_url.as_deref() {
            // Detached; the handle is dropped on purpose.
            drop(services::notify_delete(
                &self.client,
                delete_url,
                &envelope.destination_images,
            ));
        }

        let images = fan_out::all_or_first_error(settled)?;

        let destination_images = envelope
            .destination_images
            .iter()
            .zip(images)
            .map(|(descriptor, image)| DestinationImage {
                fit: descriptor.fit,
                pixel_size: descriptor.pixel_size,
                image,
            })
            .collect();

        let time_stats = TimeStats {
            sign_ms,
            send_image_ms,
            transform_ms: service_stats.transform_ms,
            get_images_ms,
            total_ms: elapsed_ms(start),
        };

        tracing::info!(
            "Transformed image into {} outputs in {} ms",
            request.destinations.len(),
            time_stats.total_ms
        );

        Ok(TransformResponse {
            source_image: envelope.source_image,
            destination_images,
            time_stats,
        })
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}
