use super::Config;
use crate::error::ImgPrepError;
use config::Config as ConfigBuilder;

pub fn load_config(config_path: &str) -> Result<Config, ImgPrepError> {
    let config_builder = ConfigBuilder::builder()
        .add_source(config::File::with_name(config_path))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

/// Loads the file when one is given, otherwise falls back to the built-in defaults.
pub fn load_config_or_default(config_path: Option<&str>) -> Result<Config, ImgPrepError> {
    match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            load_config(path)
        }
        None => {
            tracing::debug!("No configuration file given, using built-in defaults");
            Ok(Config::default())
        }
    }
}
