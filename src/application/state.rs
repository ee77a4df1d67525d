//! Shared application state
//!
//! Holds configuration plus the collaborators a scrape run needs. Everything
//! is behind `Arc` so the state can be cloned into tasks cheaply.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::repositories::ReviewStore;
use crate::domain::services::{PageFetcher, ReviewFallbackProvider, StarHistogramAggregator};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::parsing::{NoFallback, PlaceholderHistogram, SamplePoolFallback};
use crate::infrastructure::{DatabaseConnection, HttpClient, SqliteReviewStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ReviewStore>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub clock: Arc<dyn Clock>,
    pub fallback: Arc<dyn ReviewFallbackProvider>,
    pub aggregator: Arc<dyn StarHistogramAggregator>,
}

impl AppState {
    /// State over the given store and fetcher, with the system clock, the
    /// configured fallback and the placeholder histogram.
    pub fn new(config: AppConfig, store: Arc<dyn ReviewStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let fallback: Arc<dyn ReviewFallbackProvider> = if config.scraper.use_fallback_samples {
            Arc::new(SamplePoolFallback::new())
        } else {
            Arc::new(NoFallback)
        };

        Self {
            config: Arc::new(config),
            store,
            fetcher,
            clock: Arc::new(SystemClock),
            fallback,
            aggregator: Arc::new(PlaceholderHistogram),
        }
    }

    /// Connect the SQLite store and the HTTP client described by `config`.
    pub async fn initialize(config: AppConfig) -> Result<Self> {
        let database_url = config.database_url()?;
        let db = DatabaseConnection::with_max_connections(&database_url, config.database.max_connections).await?;
        db.migrate().await?;
        info!("Database ready at {}", database_url);

        let store = Arc::new(SqliteReviewStore::new(db.pool().clone()));
        let fetcher = Arc::new(HttpClient::from_scraper_config(&config.scraper)?);

        Ok(Self::new(config, store, fetcher))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ReviewFallbackProvider>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Arc<dyn StarHistogramAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }
}
