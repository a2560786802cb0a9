use super::progress::transfer_bar;
use super::throttle::Throttle;
use super::types::{DownloadItem, DownloadOptions, DownloadSummary, ItemOutcome};
use crate::error::ImgPrepError;
use eyre::{Result, WrapErr, eyre};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, ImgPrepError> {
    let mut builder =
        Client::builder().user_agent(concat!("imgprep/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub fn prepare_output_dir(output_dir: &Path) -> Result<(), ImgPrepError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ImgPrepError::OutputDirectoryCreation {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Fetches a single image and streams it to `item.output_path`, returning the number of bytes written.
///
/// Nothing is written unless the server answers with a success status. A failure while the body is
/// being streamed leaves whatever was already written on disk.
pub async fn download_one(
    client: &Client,
    item: &DownloadItem,
    options: &DownloadOptions,
) -> Result<u64> {
    let response = client
        .get(item.url.clone())
        .send()
        .await
        .wrap_err_with(|| format!("Failed to request {}", item.url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(eyre!("{} returned HTTP {}", item.url, status));
    }

    let bar = transfer_bar(response.content_length(), options.show_progress);
    let result = stream_to_file(response, item, options, &bar).await;
    bar.finish_and_clear();
    result
}

async fn stream_to_file(
    mut response: reqwest::Response,
    item: &DownloadItem,
    options: &DownloadOptions,
    bar: &indicatif::ProgressBar,
) -> Result<u64> {
    let file = tokio::fs::File::create(&item.output_path)
        .await
        .wrap_err_with(|| format!("Failed to create output file: {}", item.output_path.display()))?;
    let mut writer = BufWriter::with_capacity(options.chunk_size, file);

    let mut written: u64 = 0;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(err) => {
                // Keep what already arrived; the truncated file stays on disk.
                let _ = writer.flush().await;
                return Err(err).wrap_err_with(|| format!("Failed to read from {}", item.url));
            }
        };
        writer
            .write_all(&chunk)
            .await
            .wrap_err_with(|| format!("Failed to write to {}", item.output_path.display()))?;
        written += chunk.len() as u64;
        bar.inc(chunk.len() as u64);
    }

    writer
        .flush()
        .await
        .wrap_err_with(|| format!("Failed to flush {}", item.output_path.display()))?;

    Ok(written)
}

/// Downloads every item in order, one at a time.
///
/// Per-item failures are logged and recorded in the summary; they never stop the run.
/// The throttle is consulted between items only, so it pauses `items.len() - 1` times.
pub async fn download_all<T: Throttle>(
    client: &Client,
    items: Vec<DownloadItem>,
    throttle: &T,
    options: &DownloadOptions,
) -> DownloadSummary {
    let total = items.len();
    let mut summary = DownloadSummary::default();

    for (index, item) in items.into_iter().enumerate() {
        info!(
            position = item.position,
            url = %item.url,
            "Downloading image for: {}",
            item.query
        );

        let outcome = match download_one(client, &item, options).await {
            Ok(bytes) => {
                info!(output = %item.output_path.display(), bytes, "Downloaded image");
                info!("Successfully downloaded image {}/{}", item.position, total);
                ItemOutcome::Succeeded { bytes }
            }
            Err(err) => {
                warn!("Error downloading image for {}: {:#}", item.query, err);
                warn!("Failed to download image {}/{}", item.position, total);
                ItemOutcome::Failed {
                    reason: format!("{err:#}"),
                }
            }
        };
        summary.results.push((item, outcome));

        if index + 1 < total {
            throttle.pause().await;
        }
    }

    summary
}
