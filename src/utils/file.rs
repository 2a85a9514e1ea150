use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::Path;
use tokio::{
    fs,
    io::{AsyncWriteExt, BufWriter},
};
use tokio_util::io::ReaderStream;

use crate::error::Result;

pub async fn ensure_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() && !fs::try_exists(parent).await? {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Opens a file as a chunked byte stream together with its length.
pub async fn open_stream(
    file_path: &Path,
) -> Result<(u64, ReaderStream<fs::File>)> {
    let file = fs::File::open(file_path).await?;
    let size = file.metadata().await?.len();
    Ok((size, ReaderStream::new(file)))
}

/// Writes every chunk of `stream` into a new file at `file_path`.
/// On any failure the partially written file is removed.
pub async fn write_stream<S, E>(file_path: &Path, stream: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    crate::error::ScalerError: From<E>,
{
    ensure_directory_exists(file_path).await?;
    let file = fs::File::create(file_path).await?;

    match copy_into(BufWriter::new(file), stream).await {
        Ok(written) => Ok(written),
        Err(e) => {
            if let Err(remove_err) = delete_file(file_path).await {
                tracing::debug!(
                    "Could not remove partial file {}: {}",
                    file_path.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

async fn copy_into<S, E>(mut writer: BufWriter<fs::File>, stream: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    crate::error::ScalerError: From<E>,
{
    futures::pin_mut!(stream);
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    writer.into_inner().sync_all().await?;
    Ok(written)
}

pub async fn delete_file(file_path: &Path) -> Result<()> {
    if fs::try_exists(file_path).await? {
        fs::remove_file(file_path).await?;
    }
    Ok(())
}
