use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug, PartialEq)]
pub struct DownloadItem {
    /// 1-based position in the query list; determines the file name.
    pub position: usize,
    pub query: String,
    pub url: Url,
    pub output_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemOutcome {
    Succeeded { bytes: u64 },
    Failed { reason: String },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Succeeded { .. })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DownloadOptions {
    /// Write buffer size for streaming the response body to disk.
    pub chunk_size: usize,
    pub show_progress: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            show_progress: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DownloadSummary {
    pub results: Vec<(DownloadItem, ItemOutcome)>,
}

impl DownloadSummary {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn outcome_for(&self, position: usize) -> Option<&ItemOutcome> {
        self.results
            .iter()
            .find(|(item, _)| item.position == position)
            .map(|(_, outcome)| outcome)
    }
}
