use crate::cli::DownloadParams;
use crate::download::{
    DownloadSummary, FixedDelay, build_http_client, download_all, prepare_output_dir,
};
use crate::error::ImgPrepError;
use tracing;

pub async fn run_download(params: DownloadParams) -> Result<DownloadSummary, ImgPrepError> {
    let DownloadParams {
        items,
        output_dir,
        delay,
        timeout,
        options,
        manifest_hint,
    } = params;

    // The only fatal failure: without the directory nothing can be written.
    prepare_output_dir(&output_dir)?;
    let client = build_http_client(timeout)?;

    tracing::info!(
        "Starting restaurant image download of {} images into {}",
        items.len(),
        output_dir.display()
    );
    let summary = download_all(&client, items, &FixedDelay(delay), &options).await;

    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "Download complete! Please check the images and update any that don't match well."
    );
    tracing::info!(
        "Remember to add these images to your {} asset entries.",
        manifest_hint
    );

    Ok(summary)
}
