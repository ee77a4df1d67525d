//! Infrastructure layer for configuration, storage, fetching and parsing
//!
//! Concrete implementations of the domain collaborator traits plus the
//! configuration and logging setup the binary wires together.

pub mod config; // Configuration file, env overlay and catalog
pub mod database_connection;
pub mod http_client;
pub mod logging;
pub mod parsing; // Review listing and metadata extraction
pub mod review_repository;

// Re-export commonly used items
pub use config::{AppCatalogEntry, AppConfig, ConfigError, ConfigManager, ScraperConfig};
pub use database_connection::DatabaseConnection;
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{
    MetadataParser, NoFallback, ParsingError, ParsingResult, PlaceholderHistogram, ReviewListParser,
    SamplePoolFallback,
};
pub use review_repository::SqliteReviewStore;
