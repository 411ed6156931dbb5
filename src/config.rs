use std::{env, path::Path, sync::OnceLock};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the catalog service,
/// including catalog behavior and tracing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Catalog store configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// Catalog store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Whether to start with the sample authors and books
    #[serde(default)]
    pub seed: bool,
    /// What happens to an author's books when the author is deleted
    #[serde(default)]
    pub author_delete_policy: AuthorDeletePolicy,
}

/// Handling of books whose author is being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorDeletePolicy {
    /// Refuse to delete an author that still has books
    #[default]
    Restrict,
    /// Delete the author's books together with the author
    Cascade,
    /// Delete the author and leave its books pointing at a missing author
    Permissive,
}

/// Tracing configuration.
///
/// Controls how log events are written to standard error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracingConfig {
    /// Output format of log lines
    #[serde(default)]
    pub format: LogFormat,
    /// Filter directives such as `info` or `catalog_service=debug`.
    /// Falls back to `RUST_LOG` when unset.
    pub filter: Option<String>,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human readable
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event
    Json,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG_PATH";
const ENV_PREFIX: &str = "CATALOG";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_NAME_KEY: &str = "distribution.name";
const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

impl AppConfig {
    /// Gets the global application configuration instance.
    ///
    /// Uses a static `OnceLock` to ensure the configuration is loaded only once.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be loaded.
    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AppConfig> = OnceLock::new();
        INSTANCE.get_or_init(|| Self::load().unwrap())
    }

    /// Loads configuration from files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        let config_path = Path::new(&config_path);

        let mut config_builder = Config::builder()
            .set_default(DISTRIBUTION_NAME_KEY, env!("CARGO_PKG_NAME"))?
            .set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        config_builder = config_builder
            .add_source(File::from(config_path.join("default")).required(false));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        config_builder =
            config_builder.add_source(File::from(config_path.join("local")).required(false));

        // Add in settings from the environment (with a prefix of CATALOG)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn deserialize() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                r#"
                [distribution]
                name = "catalog"

                [catalog]
                seed = true
                author_delete_policy = "cascade"

                [tracing]
                format = "json"
                filter = "catalog_service=debug"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.distribution.name, "catalog");
        assert!(config.distribution.version.is_none());
        assert!(config.catalog.seed);
        assert_eq!(
            config.catalog.author_delete_policy,
            AuthorDeletePolicy::Cascade
        );
        assert_eq!(config.tracing.format, LogFormat::Json);
        assert_eq!(
            config.tracing.filter.as_deref(),
            Some("catalog_service=debug")
        );
    }

    #[test]
    fn tracing_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                r#"
                [distribution]
                name = "catalog"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.tracing.format, LogFormat::Pretty);
        assert!(config.tracing.filter.is_none());
    }

    #[test]
    fn catalog_defaults() {
        let config: CatalogConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!config.seed);
        assert_eq!(config.author_delete_policy, AuthorDeletePolicy::Restrict);
    }
}
