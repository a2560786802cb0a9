use super::types::DownloadItem;
use crate::config::OutputConfig;
use crate::error::ImgPrepError;
use crate::search::SearchTemplate;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileNaming {
    pub prefix: String,
    pub extension: String,
}

impl FileNaming {
    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            prefix: output.file_prefix.clone(),
            extension: output.file_extension.clone(),
        }
    }

    pub fn file_name(&self, position: usize) -> String {
        if self.extension.is_empty() {
            format!("{}{}", self.prefix, position)
        } else {
            format!("{}{}.{}", self.prefix, position, self.extension)
        }
    }
}

impl Default for FileNaming {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

/// Builds one download item per query, numbered from 1 in list order.
pub fn plan_downloads(
    queries: &[String],
    search: &SearchTemplate,
    naming: &FileNaming,
    output_dir: &Path,
) -> Result<Vec<DownloadItem>, ImgPrepError> {
    queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let position = index + 1;
            Ok(DownloadItem {
                position,
                query: query.clone(),
                url: search.url_for(query)?,
                output_path: output_path_for(output_dir, naming, position),
            })
        })
        .collect()
}

pub fn output_path_for(output_dir: &Path, naming: &FileNaming, position: usize) -> PathBuf {
    output_dir.join(naming.file_name(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_are_one_based() {
        let naming = FileNaming::default();
        assert_eq!(naming.file_name(1), "restaurant1.jpg");
        assert_eq!(naming.file_name(10), "restaurant10.jpg");
    }

    #[test]
    fn test_custom_naming_without_extension() {
        let naming = FileNaming {
            prefix: "venue-".to_string(),
            extension: String::new(),
        };
        assert_eq!(naming.file_name(3), "venue-3");
    }

    #[test]
    fn test_plan_keeps_list_order() {
        let queries = vec!["Zen Garden".to_string(), "Sky View Lounge".to_string()];
        let items = plan_downloads(
            &queries,
            &SearchTemplate::default(),
            &FileNaming::default(),
            Path::new("assets/images"),
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].position, 1);
        assert_eq!(items[0].query, "Zen Garden");
        assert_eq!(
            items[0].output_path,
            PathBuf::from("assets/images/restaurant1.jpg")
        );
        assert_eq!(
            items[1].url.as_str(),
            "https://source.unsplash.com/featured/?restaurant,sky-view-lounge,kenya"
        );
        assert_eq!(
            items[1].output_path,
            output_path_for(Path::new("assets/images"), &FileNaming::default(), 2)
        );
    }

    #[test]
    fn test_empty_query_list_plans_nothing() {
        let items = plan_downloads(
            &[],
            &SearchTemplate::default(),
            &FileNaming::default(),
            Path::new("out"),
        )
        .unwrap();
        assert!(items.is_empty());
    }
}
