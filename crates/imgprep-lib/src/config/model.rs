use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_QUERIES: [&str; 10] = [
    "Junction Villa Restaurant",
    "Red Square Villas",
    "The Peak Restaurant",
    "Lelo Dishes",
    "Westgate Bar Restaurant & Lodge",
    "The Carnivore Restaurant",
    "About Thyme Restaurant",
    "Talisman Restaurant",
    "Zen Garden",
    "Sky View Lounge",
];

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Restaurant names, in output order.
    pub queries: Vec<String>,
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub download: DownloadConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            search: SearchConfig::default(),
            output: OutputConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// URL with a `{keywords}` placeholder.
    pub template: String,
    pub category: String,
    pub region: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            template: "https://source.unsplash.com/featured/?{keywords}".to_string(),
            category: "restaurant".to_string(),
            region: "kenya".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    /// Asset manifest the operator is reminded to update once images are in place.
    pub manifest_hint: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("../assets/images/"),
            file_prefix: "restaurant".to_string(),
            file_extension: "jpg".to_string(),
            manifest_hint: "pubspec.yaml".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadConfig {
    pub delay_ms: u64,
    pub chunk_size: usize,
    pub timeout_secs: Option<u64>,
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            chunk_size: 8192,
            timeout_secs: Some(30),
            show_progress: true,
        }
    }
}
