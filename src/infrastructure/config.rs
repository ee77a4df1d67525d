//! Configuration infrastructure
//!
//! Contains configuration loading and management for listing-page scraping.
//!
//! Configuration is organized into sections:
//! 1. Scraper behaviour (page cap, politeness delay, cutoff window, HTTP)
//! 2. Review markup selectors
//! 3. App catalog (which listings can be scraped)
//! 4. Storage and logging

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use crate::infrastructure::parsing::config::ReviewListSelectors;

/// Prefix for environment overrides, e.g. `APP_REVIEW_SCRAPER_SCRAPER__MAX_PAGES=5`
pub const ENV_PREFIX: &str = "APP_REVIEW_SCRAPER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub selectors: ReviewListSelectors,
    pub apps: Vec<AppCatalogEntry>,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Pagination and HTTP behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Hard cap on listing pages per run
    pub max_pages: u32,

    /// Politeness delay between page fetches in milliseconds
    pub page_delay_ms: u64,

    /// Length of the trailing window; older reviews stop pagination
    pub cutoff_days: u32,

    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    pub accept_language: String,

    pub follow_redirects: bool,

    /// Substitute sample reviews when no container selector matches
    pub use_fallback_samples: bool,
}

/// One scrapeable app listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppCatalogEntry {
    /// Display name, also the storage key
    pub name: String,

    /// Path segment on the app store, e.g. `vidify`
    pub slug: String,

    /// Used when the total review count cannot be read from the page
    pub default_total_reviews: u32,

    /// Used when the overall rating cannot be read from the page
    pub default_average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL; empty means the default file in the data directory
    pub url: String,

    pub max_connections: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log file name inside the log directory
    pub file_name: String,

    /// Per-module level overrides, e.g. "app_review_scraper_lib::infrastructure::parsing": "trace".
    /// Noisy dependencies are already clamped unless the level is trace.
    pub module_filters: HashMap<String, String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_pages: defaults::MAX_PAGES,
            page_delay_ms: defaults::PAGE_DELAY_MS,
            cutoff_days: defaults::CUTOFF_DAYS,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            accept_language: defaults::ACCEPT_LANGUAGE.to_string(),
            follow_redirects: true,
            use_fallback_samples: true,
        }
    }
}

impl ScraperConfig {
    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: defaults::DB_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: true,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: HashMap::new(),
        }
    }
}

impl AppCatalogEntry {
    pub fn new(
        name: &str,
        slug: &str,
        default_total_reviews: u32,
        default_average_rating: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            default_total_reviews,
            default_average_rating,
        }
    }

    /// Listing page `page` (1-based), newest reviews first
    pub fn listing_url(&self, page: u32) -> String {
        shopify::listing_page_url(&self.slug, page)
    }

    pub fn metadata_url(&self) -> String {
        shopify::reviews_url(&self.slug)
    }
}

/// Apps known out of the box
pub fn default_catalog() -> Vec<AppCatalogEntry> {
    vec![
        AppCatalogEntry::new("Vidify", "vidify", 8, 5.0),
        AppCatalogEntry::new("StoreSEO", "storeseo", 0, 0.0),
        AppCatalogEntry::new("TrustedSite", "trustedsite", 0, 0.0),
    ]
}

impl AppConfig {
    /// Default configuration including the built-in app catalog
    pub fn with_default_catalog() -> Self {
        Self {
            apps: default_catalog(),
            ..Self::default()
        }
    }

    /// Look up an app by name, ignoring ASCII case
    pub fn find_app(&self, name: &str) -> Option<&AppCatalogEntry> {
        let name = name.trim();
        self.apps.iter().find(|app| app.name.eq_ignore_ascii_case(name))
    }

    pub fn app_names(&self) -> Vec<String> {
        self.apps.iter().map(|app| app.name.clone()).collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scraper.max_pages == 0 {
            return Err(ConfigError::Validation {
                message: "scraper.max_pages must be greater than 0".to_string(),
            });
        }

        if self.scraper.cutoff_days == 0 {
            return Err(ConfigError::Validation {
                message: "scraper.cutoff_days must be greater than 0".to_string(),
            });
        }

        if self.selectors.container.is_empty() {
            return Err(ConfigError::Validation {
                message: "selectors.container must list at least one selector".to_string(),
            });
        }

        if self.apps.is_empty() {
            return Err(ConfigError::Validation {
                message: "apps must contain at least one entry".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.slug.trim().is_empty() {
                return Err(ConfigError::Validation {
                    message: format!("app '{}' has an empty slug", app.name),
                });
            }
            // The slug must stay a single path segment of the listing URL
            let expected_path = format!("/{}/reviews", app.slug);
            match url::Url::parse(&app.metadata_url()) {
                Ok(parsed) if parsed.path() == expected_path && parsed.query().is_none() => {}
                _ => {
                    return Err(ConfigError::Validation {
                        message: format!("app '{}' has an invalid slug '{}'", app.name, app.slug),
                    });
                }
            }
            if !seen.insert(app.name.to_ascii_lowercase()) {
                return Err(ConfigError::Validation {
                    message: format!("duplicate app name '{}'", app.name),
                });
            }
        }

        Ok(())
    }

    /// Database URL, falling back to the default file in the data directory
    pub fn database_url(&self) -> Result<String> {
        if !self.database.url.is_empty() {
            return Ok(self.database.url.clone());
        }
        let path = ConfigManager::get_app_data_dir()?
            .join("database")
            .join(defaults::DB_FILE_NAME);
        Ok(format!("sqlite:{}", path.display()))
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(data_dir)
    }

    /// Manager for the config file in the user config directory
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Load configuration, creating the default file if it doesn't exist.
    ///
    /// The file is layered under environment overrides prefixed with
    /// `APP_REVIEW_SCRAPER` (nested keys separated by `__`).
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::with_default_catalog();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let config = Self::build_layered(&self.config_path)
            .with_context(|| format!("Failed to load configuration from {:?}", self.config_path))?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    fn build_layered(path: &Path) -> Result<AppConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Json))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        if config.apps.is_empty() {
            warn!("No apps configured, using the built-in catalog");
            config.apps = default_catalog();
        }
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

/// App store URLs
pub mod shopify {
    /// Base URL for the app store
    pub const BASE_URL: &str = "https://apps.shopify.com";

    /// Reviews landing page, used for aggregate metadata
    pub fn reviews_url(slug: &str) -> String {
        format!("{}/{}/reviews", BASE_URL, slug)
    }

    /// Review listing page sorted newest-first
    pub fn listing_page_url(slug: &str, page: u32) -> String {
        format!("{}?sort_by=newest&page={}", reviews_url(slug), page)
    }
}

/// Default configuration values
pub mod defaults {
    /// Default maximum pages per run
    pub const MAX_PAGES: u32 = 50;

    /// Default politeness delay between pages in milliseconds
    pub const PAGE_DELAY_MS: u64 = 2000;

    /// Default trailing window in days
    pub const CUTOFF_DAYS: u32 = 30;

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

    pub const DB_MAX_CONNECTIONS: u32 = 5;

    pub const DB_FILE_NAME: &str = "reviews.db";

    pub const APP_DIR_NAME: &str = "app-review-scraper";

    pub const CONFIG_FILE_NAME: &str = "config.json";

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_FILE_NAME: &str = "app-review-scraper.log";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::with_default_catalog();
        assert!(config.validate().is_ok());
        assert_eq!(config.scraper.max_pages, 50);
        assert_eq!(config.scraper.cutoff_days, 30);
        assert_eq!(config.scraper.page_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_validation_rejects_zero_pages_and_duplicates() {
        let mut config = AppConfig::with_default_catalog();
        config.scraper.max_pages = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation { .. })));

        let mut config = AppConfig::with_default_catalog();
        config.apps.push(AppCatalogEntry::new("vidify", "vidify-copy", 0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_multi_segment_slug() {
        let mut config = AppConfig::with_default_catalog();
        config.apps.push(AppCatalogEntry::new("Other", "other/reviews?x=1", 0, 0.0));
        assert!(matches!(config.validate(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_find_app_ignores_case() {
        let config = AppConfig::with_default_catalog();
        assert_eq!(config.find_app(" VIDIFY ").map(|a| a.slug.as_str()), Some("vidify"));
        assert!(config.find_app("Nope").is_none());
    }

    #[test]
    fn test_listing_urls() {
        let app = AppCatalogEntry::new("Vidify", "vidify", 8, 5.0);
        assert_eq!(
            app.listing_url(3),
            "https://apps.shopify.com/vidify/reviews?sort_by=newest&page=3"
        );
        assert_eq!(app.metadata_url(), "https://apps.shopify.com/vidify/reviews");
    }

    #[tokio::test]
    async fn test_load_creates_default_then_reads_back() -> Result<()> {
        let dir = tempdir()?;
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        let created = manager.load_config().await?;
        assert!(manager.config_path().exists());

        let loaded = manager.load_config().await?;
        assert_eq!(loaded.app_names(), created.app_names());
        assert_eq!(loaded.scraper.max_pages, created.scraper.max_pages);
        Ok(())
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{ "scraper": { "max_pages": 3 } }"#).await?;

        let loaded = ConfigManager::with_path(&path).load_config().await?;
        assert_eq!(loaded.scraper.max_pages, 3);
        assert_eq!(loaded.scraper.cutoff_days, 30);
        assert!(loaded.find_app("Vidify").is_some());
        Ok(())
    }
}
