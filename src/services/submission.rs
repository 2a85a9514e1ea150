use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Body, Client, StatusCode,
};

use crate::{
    error::{Result, ScalerError},
    models::{ImageSource, ServiceTransformResponse},
    utils::file,
};

/// Sends the source image to the signed URL and parses the service envelope.
///
/// Local files are streamed from disk. A remote URL source sends no body;
/// the service fetches the image itself. A `Body` source posts an
/// octet-stream request without a declared length.
pub async fn submit(
    client: &Client,
    signed_url: &str,
    source: &ImageSource,
) -> Result<ServiceTransformResponse> {
    let octet_stream = mime::APPLICATION_OCTET_STREAM.as_ref();

    let request = match source {
        ImageSource::Buffer(bytes) => {
            tracing::debug!("Submitting {} byte buffer", bytes.len());
            client
                .post(signed_url)
                .header(CONTENT_TYPE, octet_stream)
                .header(CONTENT_LENGTH, bytes.len())
                .body(bytes.clone())
        }
        ImageSource::LocalPath(path) => {
            let (size, stream) = file::open_stream(path).await?;
            tracing::debug!("Streaming {} ({} bytes)", path.display(), size);
            client
                .post(signed_url)
                .header(CONTENT_TYPE, octet_stream)
                .header(CONTENT_LENGTH, size)
                .body(Body::wrap_stream(stream))
        }
        ImageSource::Body => {
            tracing::debug!("Submitting request body without a known length");
            client.post(signed_url).header(CONTENT_TYPE, octet_stream)
        }
        ImageSource::RemoteUrl(url) => {
            tracing::debug!("Service will fetch source from {}", url);
            client.post(signed_url)
        }
    };

    let response = request.send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Image submission rejected with status {}", status);
        return Err(ScalerError::Submission {
            status: status.as_u16(),
            text,
        });
    }

    let body = response.bytes().await?;
    let envelope: ServiceTransformResponse = serde_json::from_slice(&body)?;
    Ok(envelope)
}
