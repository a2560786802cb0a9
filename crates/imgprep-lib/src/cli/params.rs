use crate::download::{DownloadItem, DownloadOptions};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DownloadParams {
    pub items: Vec<DownloadItem>,
    pub output_dir: PathBuf,
    pub delay: Duration,
    pub timeout: Option<Duration>,
    pub options: DownloadOptions,
    pub manifest_hint: String,
}

#[derive(Debug, Clone)]
pub struct PlanParams {
    pub items: Vec<DownloadItem>,
}
