use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::mealdb::DEFAULT_BASE_URL;
use crate::render::OutputFormat;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Root of the recipe API; endpoint names are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// How frames are drawn
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            format: OutputFormat::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("meal-finder/{}", env!("CARGO_PKG_VERSION"))
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEAL_FINDER__ prefix
    /// 2. meal-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEAL_FINDER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config("meal-finder")
    }
}

/// Load configuration from `<file_stem>.toml` (optional) and the environment
pub fn load_config(file_stem: &str) -> Result<FinderConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix("MEAL_FINDER")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
