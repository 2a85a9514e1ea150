use reqwest::Client;
use tokio::task::JoinHandle;

use crate::models::{ImageDeleteBody, OutputDescriptor};

/// Asks the service to drop the temporary files it kept for `descriptors`.
///
/// Runs as a detached task; failures are logged and never reach the caller.
/// Callers on the transform path drop the returned handle without awaiting it.
pub fn notify_delete(
    client: &Client,
    delete_url: &str,
    descriptors: &[OutputDescriptor],
) -> JoinHandle<()> {
    let body = ImageDeleteBody {
        images: descriptors
            .iter()
            .filter_map(|d| d.file_id.clone())
            .collect(),
    };
    let client = client.clone();
    let delete_url = delete_url.to_string();

    tokio::spawn(async move {
        match client.delete(&delete_url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Deleted {} temporary images", body.images.len());
            }
            Ok(response) => {
                tracing::error!(
                    "Failed to delete received images: status {}",
                    response.status()
                );
            }
            Err(e) => {
                tracing::error!("Failed to delete received images: {}", e);
            }
        }
    })
}
