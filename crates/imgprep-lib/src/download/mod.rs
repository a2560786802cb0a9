#[allow(clippy::module_inception)]
mod download;
mod plan;
mod progress;
mod throttle;
mod types;

pub use download::{build_http_client, download_all, download_one, prepare_output_dir};
pub use plan::{FileNaming, output_path_for, plan_downloads};
pub use progress::transfer_bar;
pub use throttle::{FixedDelay, Throttle};
pub use types::{DownloadItem, DownloadOptions, DownloadSummary, ItemOutcome};
