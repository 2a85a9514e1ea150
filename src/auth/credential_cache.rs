use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{api_key::TokenProvider, jwt::Credential};
use crate::error::{Result, ScalerError};

type RefreshFlight = Shared<BoxFuture<'static, std::result::Result<Credential, String>>>;

#[derive(Default)]
struct CacheState {
    credential: Option<Credential>,
    in_flight: Option<(u64, RefreshFlight)>,
    generation: u64,
}

/// Holds the current access token and makes sure at most one refresh is
/// outstanding at a time. Callers arriving while a refresh runs wait on it
/// and receive its outcome, success or failure.
pub struct CredentialCache {
    provider: Arc<dyn TokenProvider>,
    state: Mutex<CacheState>,
}

impl CredentialCache {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub async fn ensure_valid(&self) -> Result<Credential> {
        let (generation, flight) = {
            let mut state = self.state.lock().await;

            if let Some(credential) = &state.credential {
                if !credential.is_expired() {
                    return Ok(credential.clone());
                }
                tracing::debug!("Access token expired at {}", credential.expires_at());
            }

            if let Some((generation, flight)) = state.in_flight.clone() {
                tracing::debug!("Joining in-flight access token refresh");
                (generation, flight)
            } else {
                state.generation += 1;
                let generation = state.generation;
                let flight = refresh(self.provider.clone());
                state.in_flight = Some((generation, flight.clone()));
                (generation, flight)
            }
        };

        let outcome = flight.await;

        {
            let mut state = self.state.lock().await;
            let settles_current = matches!(&state.in_flight, Some((g, _)) if *g == generation);
            if settles_current {
                state.in_flight = None;
                state.credential = outcome.as_ref().ok().cloned();
            }
        }

        outcome.map_err(ScalerError::Auth)
    }

    /// Drops the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        self.state.lock().await.credential = None;
    }
}

fn refresh(provider: Arc<dyn TokenProvider>) -> RefreshFlight {
    async move {
        let result = provider
            .fetch_access_token()
            .await
            .and_then(Credential::from_token);

        match result {
            Ok(credential) => {
                tracing::info!("Access token refreshed, expires at {}", credential.expires_at());
                Ok(credential)
            }
            Err(ScalerError::Auth(message)) => {
                tracing::error!("Access token refresh failed: {}", message);
                Err(message)
            }
            Err(e) => {
                tracing::error!("Access token refresh failed: {}", e);
                Err(e.to_string())
            }
        }
    }
    .boxed()
    .shared()
}
