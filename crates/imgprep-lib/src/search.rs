use crate::config::SearchConfig;
use crate::error::ImgPrepError;
use url::Url;
use url::form_urlencoded::byte_serialize;

const KEYWORDS_PLACEHOLDER: &str = "{keywords}";

/// Lowercases a query and replaces spaces with hyphens.
pub fn format_query(query: &str) -> String {
    query.to_lowercase().replace(' ', "-")
}

/// Renders image-search URLs for restaurant names.
///
/// The formatted query is placed between the category and region keywords,
/// e.g. `restaurant,zen-garden,kenya`. Results from the endpoint are a
/// best-effort match and may differ between runs.
#[derive(Clone, Debug)]
pub struct SearchTemplate {
    template: String,
    category: String,
    region: String,
}

impl SearchTemplate {
    pub fn new(
        template: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, ImgPrepError> {
        let search = Self {
            template: template.into(),
            category: category.into(),
            region: region.into(),
        };

        if !search.template.contains(KEYWORDS_PLACEHOLDER) {
            return Err(ImgPrepError::SearchTemplate {
                template: search.template,
                reason: format!("missing {KEYWORDS_PLACEHOLDER} placeholder"),
            });
        }
        // Catch malformed templates before the first download is attempted.
        search.url_for("probe")?;

        Ok(search)
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self, ImgPrepError> {
        Self::new(&config.template, &config.category, &config.region)
    }

    pub fn keywords_for(&self, query: &str) -> String {
        let term: String = byte_serialize(format_query(query).as_bytes()).collect();
        [self.category.as_str(), term.as_str(), self.region.as_str()]
            .into_iter()
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn url_for(&self, query: &str) -> Result<Url, ImgPrepError> {
        let rendered = self
            .template
            .replace(KEYWORDS_PLACEHOLDER, &self.keywords_for(query));
        Url::parse(&rendered).map_err(|e| ImgPrepError::SearchTemplate {
            template: self.template.clone(),
            reason: e.to_string(),
        })
    }
}

impl Default for SearchTemplate {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self {
            template: config.template,
            category: config.category,
            region: config.region,
        }
    }
}
