use reqwest::{header::AUTHORIZATION, Client, StatusCode};

use crate::{
    auth::Credential,
    error::{Result, ScalerError},
    models::{SignResponse, WireTransformRequest},
};

/// Exchanges a transform description for a one-time submission URL.
pub async fn request_signed_url(
    client: &Client,
    sign_url: &str,
    credential: &Credential,
    request: &WireTransformRequest,
) -> Result<String> {
    let response = client
        .post(sign_url)
        .header(AUTHORIZATION, credential.bearer())
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Sign request rejected with status {}", status);
        return Err(ScalerError::Sign {
            status: status.as_u16(),
            text,
        });
    }

    let signed: SignResponse = response.json().await?;
    tracing::debug!(
        "Received signed submission url for {} destinations",
        request.destinations.len()
    );
    Ok(signed.url)
}
