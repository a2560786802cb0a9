use crate::cli::args::Command;
use crate::cli::params::{DownloadParams, PlanParams};
use crate::config::{Config, load_config_or_default};
use crate::download::{DownloadItem, DownloadOptions, FileNaming, plan_downloads};
use crate::error::ImgPrepError;
use crate::search::SearchTemplate;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Download(DownloadParams),
    Plan(PlanParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, ImgPrepError> {
    match command {
        Command::Download {
            config_path,
            output_dir,
            queries,
            delay_ms,
            chunk_size,
            timeout_secs,
            no_progress,
        } => {
            let app_config = load_config_or_default(config_path.as_deref())?;

            let chunk_size = chunk_size.unwrap_or(app_config.download.chunk_size);
            if chunk_size == 0 {
                return Err(ImgPrepError::CliArgumentValidation {
                    details: "chunk-size must be greater than 0.".to_string(),
                });
            }

            let output_dir = output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.output.path.clone());
            let items = resolve_items(&app_config, queries, &output_dir)?;

            Ok(ResolvedCommand::Download(DownloadParams {
                items,
                output_dir,
                delay: Duration::from_millis(delay_ms.unwrap_or(app_config.download.delay_ms)),
                timeout: timeout_secs
                    .or(app_config.download.timeout_secs)
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
                options: DownloadOptions {
                    chunk_size,
                    show_progress: app_config.download.show_progress && !no_progress,
                },
                manifest_hint: app_config.output.manifest_hint,
            }))
        }
        Command::Plan {
            config_path,
            output_dir,
            queries,
        } => {
            let app_config = load_config_or_default(config_path.as_deref())?;
            let output_dir = output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| app_config.output.path.clone());
            let items = resolve_items(&app_config, queries, &output_dir)?;

            Ok(ResolvedCommand::Plan(PlanParams { items }))
        }
    }
}

fn resolve_items(
    app_config: &Config,
    queries: Vec<String>,
    output_dir: &std::path::Path,
) -> Result<Vec<DownloadItem>, ImgPrepError> {
    let queries: Vec<String> = if queries.is_empty() {
        app_config.queries.clone()
    } else {
        queries
    }
    .into_iter()
    .map(|q| q.trim().to_string())
    .collect();

    if queries.is_empty() {
        return Err(ImgPrepError::CliArgumentValidation {
            details: "No restaurant names provided. Configure queries or pass --query."
                .to_string(),
        });
    }
    // Positions name the output files, so a blank entry cannot simply be skipped.
    if let Some(index) = queries.iter().position(|q| q.is_empty()) {
        return Err(ImgPrepError::CliArgumentValidation {
            details: format!("Restaurant name at position {} is blank.", index + 1),
        });
    }

    let search = SearchTemplate::from_config(&app_config.search)?;
    let naming = FileNaming::from_config(&app_config.output);
    plan_downloads(&queries, &search, &naming, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn download_command() -> Command {
        Command::Download {
            config_path: None,
            output_dir: None,
            queries: vec![],
            delay_ms: None,
            chunk_size: None,
            timeout_secs: None,
            no_progress: false,
        }
    }

    #[test]
    fn test_download_uses_built_in_defaults() {
        let ResolvedCommand::Download(params) = resolve_command(download_command()).unwrap()
        else {
            panic!("Resolved command type mismatch");
        };

        assert_eq!(params.items.len(), 10);
        assert_eq!(params.output_dir, PathBuf::from("../assets/images/"));
        assert_eq!(params.delay, Duration::from_secs(1));
        assert_eq!(params.timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.options.chunk_size, 8192);
        assert!(params.options.show_progress);
        assert_eq!(params.manifest_hint, "pubspec.yaml");
        assert_eq!(
            params.items[9].output_path,
            PathBuf::from("../assets/images/restaurant10.jpg")
        );
    }

    #[test]
    fn test_cli_flags_override_config() {
        let command = Command::Download {
            config_path: None,
            output_dir: Some("out".to_string()),
            queries: vec!["Zen Garden".to_string(), " Sky View Lounge ".to_string()],
            delay_ms: Some(0),
            chunk_size: Some(1024),
            timeout_secs: Some(0),
            no_progress: true,
        };

        let ResolvedCommand::Download(params) = resolve_command(command).unwrap() else {
            panic!("Resolved command type mismatch");
        };

        assert_eq!(params.items.len(), 2);
        assert_eq!(params.items[0].output_path, PathBuf::from("out/restaurant1.jpg"));
        assert_eq!(params.items[1].query, "Sky View Lounge");
        assert_eq!(params.items[1].output_path, PathBuf::from("out/restaurant2.jpg"));
        assert_eq!(params.delay, Duration::ZERO);
        assert_eq!(params.timeout, None);
        assert_eq!(params.options.chunk_size, 1024);
        assert!(!params.options.show_progress);
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let command = Command::Download {
            config_path: None,
            output_dir: None,
            queries: vec![],
            delay_ms: None,
            chunk_size: Some(0),
            timeout_secs: None,
            no_progress: false,
        };

        let result = resolve_command(command);
        assert!(matches!(
            result,
            Err(ImgPrepError::CliArgumentValidation { .. })
        ));
    }

    #[test]
    fn test_blank_query_between_names_is_rejected() {
        let command = Command::Plan {
            config_path: None,
            output_dir: Some("out".to_string()),
            queries: vec![
                "Zen Garden".to_string(),
                "".to_string(),
                "Sky View Lounge".to_string(),
            ],
        };

        let result = resolve_command(command);
        assert!(matches!(
            result,
            Err(ImgPrepError::CliArgumentValidation { ref details }) if details.contains("position 2")
        ));
    }

    #[test]
    fn test_blank_queries_in_config_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgprep.yaml");
        std::fs::write(&config_path, "queries:\n  - \"  \"\n").unwrap();

        let command = Command::Plan {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            output_dir: None,
            queries: vec![],
        };

        let result = resolve_command(command);
        assert!(matches!(
            result,
            Err(ImgPrepError::CliArgumentValidation { .. })
        ));
    }

    #[test]
    fn test_bad_template_in_config_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgprep.toml");
        std::fs::write(
            &config_path,
            "[search]\ntemplate = \"https://example.com/featured\"\n",
        )
        .unwrap();

        let command = Command::Plan {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            output_dir: None,
            queries: vec![],
        };

        let result = resolve_command(command);
        assert!(matches!(result, Err(ImgPrepError::SearchTemplate { .. })));
    }

    #[test]
    fn test_plan_reads_output_settings_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("imgprep.yaml");
        std::fs::write(
            &config_path,
            "queries:\n  - Lelo Dishes\noutput:\n  path: media\n  file_prefix: venue\n  file_extension: png\n",
        )
        .unwrap();

        let command = Command::Plan {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            output_dir: None,
            queries: vec![],
        };

        let ResolvedCommand::Plan(params) = resolve_command(command).unwrap() else {
            panic!("Resolved command type mismatch");
        };
        assert_eq!(params.items.len(), 1);
        assert_eq!(params.items[0].output_path, PathBuf::from("media/venue1.png"));
    }
}
