//! Storage interface for scraped reviews and app metadata

use async_trait::async_trait;
use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::app_metadata::AppMetadata;
use super::review::Review;
use super::scrape_report::DateRange;

/// Rows removed by `clear_app_data`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedCounts {
    pub reviews: u64,
    pub metadata: u64,
}

/// Every operation must accept zero records.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Delete all reviews and metadata for an app.
    async fn clear_app_data(&self, app_name: &str) -> Result<ClearedCounts>;

    /// Insert a batch of reviews, returning how many rows were written.
    async fn insert_reviews(&self, app_name: &str, reviews: &[Review]) -> Result<u64>;

    /// Create or overwrite the metadata row for `metadata.app_name`.
    async fn upsert_metadata(&self, metadata: &AppMetadata) -> Result<()>;

    /// Oldest and newest stored review date, or `None` when nothing is stored.
    async fn query_date_range(&self, app_name: &str) -> Result<Option<DateRange>>;

    async fn count_reviews(&self, app_name: &str) -> Result<u64>;

    async fn find_reviews(&self, app_name: &str) -> Result<Vec<Review>>;

    async fn find_metadata(&self, app_name: &str) -> Result<Option<AppMetadata>>;

    /// App names with at least one stored review.
    async fn list_stored_apps(&self) -> Result<Vec<String>>;
}
