use futures::{future::join_all, StreamExt};
use reqwest::{Client, Response, StatusCode};
use std::path::{Path, PathBuf};

use crate::{
    error::{Result, ScalerError},
    models::{Destination, ImageDelivery, OutputDescriptor, OutputImageResult},
    utils::file,
};

/// Resolves every output descriptor into the delivery form its destination
/// asked for. All retrievals run concurrently and every one of them settles;
/// the returned vector is in destination order.
pub async fn resolve_outputs(
    client: &Client,
    descriptors: &[OutputDescriptor],
    destinations: &[Destination],
) -> Vec<Result<OutputImageResult>> {
    let resolutions = descriptors.iter().enumerate().map(|(i, descriptor)| {
        let delivery = destinations.get(i).map(|d| &d.delivery);
        resolve_one(client, descriptor, delivery)
    });

    join_all(resolutions).await
}

async fn resolve_one(
    client: &Client,
    descriptor: &OutputDescriptor,
    delivery: Option<&ImageDelivery>,
) -> Result<OutputImageResult> {
    let Some(download_url) = descriptor.download_url.as_deref() else {
        return Ok(OutputImageResult::Uploaded);
    };

    match delivery {
        Some(ImageDelivery::SaveToLocalPath(path)) => save_to_path(client, download_url, path).await,
        _ => download_to_buffer(client, download_url).await,
    }
}

async fn save_to_path(client: &Client, url: &str, path: &Path) -> Result<OutputImageResult> {
    let response = fetch(client, url).await?;
    let chunks = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(|e| download_failed(url, e)));
    let written = file::write_stream(path, chunks).await?;
    tracing::debug!("Saved {} bytes to {}", written, path.display());
    Ok(OutputImageResult::LocalPath(PathBuf::from(path)))
}

async fn download_to_buffer(client: &Client, url: &str) -> Result<OutputImageResult> {
    let bytes = fetch(client, url)
        .await?
        .bytes()
        .await
        .map_err(|e| download_failed(url, e))?;
    tracing::debug!("Downloaded {} bytes", bytes.len());
    Ok(OutputImageResult::Buffer(bytes))
}

async fn fetch(client: &Client, url: &str) -> Result<Response> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_failed(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        let text = response.text().await.unwrap_or_default();
        tracing::warn!("Download of output image failed with status {}", status);
        return Err(ScalerError::Download {
            status: status.as_u16(),
            text,
        });
    }

    Ok(response)
}

fn download_failed(url: &str, e: reqwest::Error) -> ScalerError {
    tracing::warn!("Download of output image from {} failed: {}", url, e);
    ScalerError::DownloadFailed(e.to_string())
}

/// Collapses settled results, surfacing the first failure in destination order.
pub fn all_or_first_error(results: Vec<Result<OutputImageResult>>) -> Result<Vec<OutputImageResult>> {
    results.into_iter().collect()
}
