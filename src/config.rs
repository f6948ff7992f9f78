use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    pub collection: CollectionSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub users: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_activities_weight")]
    pub activities: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_age_closeness_weight")]
    pub age_closeness: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            activities: default_activities_weight(),
            availability: default_availability_weight(),
            age_closeness: default_age_closeness_weight(),
        }
    }
}

fn default_interests_weight() -> f64 { 50.0 }
fn default_activities_weight() -> f64 { 40.0 }
fn default_availability_weight() -> f64 { 10.0 }
fn default_age_closeness_weight() -> f64 { 30.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MINGLE__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. MINGLE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MINGLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MINGLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply directory credentials from the environment over the file config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("MINGLE_DIRECTORY__ENDPOINT").ok();
    let api_key = env::var("MINGLE_DIRECTORY__API_KEY").ok();
    let project_id = env::var("MINGLE_DIRECTORY__PROJECT_ID").ok();
    let database_id = env::var("MINGLE_DIRECTORY__DATABASE_ID").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("directory.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("directory.api_key", api_key)?;
    }
    if let Some(project_id) = project_id {
        builder = builder.set_override("directory.project_id", project_id)?;
    }
    if let Some(database_id) = database_id {
        builder = builder.set_override("directory.database_id", database_id)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.interests, 50.0);
        assert_eq!(weights.activities, 40.0);
        assert_eq!(weights.availability, 10.0);
        assert_eq!(weights.age_closeness, 30.0);
    }

    #[test]
    fn test_default_logging() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }
}
