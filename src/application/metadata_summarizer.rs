//! Listing-level metadata: total count, average rating and star breakdown

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::app_metadata::AppMetadata;
use crate::domain::errors::{ScrapeError, ScrapeResult};
use crate::domain::services::{PageFetcher, StarHistogramAggregator};
use crate::infrastructure::config::AppCatalogEntry;
use crate::infrastructure::parsing::MetadataParser;

pub struct MetadataSummarizer {
    fetcher: Arc<dyn PageFetcher>,
    aggregator: Arc<dyn StarHistogramAggregator>,
    parser: MetadataParser,
}

impl MetadataSummarizer {
    pub fn new(fetcher: Arc<dyn PageFetcher>, aggregator: Arc<dyn StarHistogramAggregator>) -> Self {
        Self {
            fetcher,
            aggregator,
            parser: MetadataParser::new(),
        }
    }

    /// Fetch the landing page once. Figures missing from the markup fall
    /// back to the catalog defaults; a failed fetch is returned as an error
    /// so the caller can skip the upsert.
    pub async fn summarize(&self, app: &AppCatalogEntry) -> ScrapeResult<AppMetadata> {
        let url = app.metadata_url();
        let page = self.fetcher.get(&url).await?;
        if !page.is_success() {
            return Err(ScrapeError::HttpStatus {
                url,
                status: page.status,
            });
        }

        let figures = self.parser.parse(&page.body);
        debug!("Metadata figures for {}: {:?}", app.name, figures);

        let total_reviews = figures.total_reviews.unwrap_or(app.default_total_reviews);
        let average_rating = figures.average_rating.unwrap_or(app.default_average_rating);
        let star_histogram = self
            .aggregator
            .aggregate(total_reviews, average_rating, &page.body);

        info!(
            "Metadata for {}: {} total reviews, {} rating",
            app.name, total_reviews, average_rating
        );

        Ok(AppMetadata {
            app_name: app.name.clone(),
            total_reviews,
            average_rating,
            star_histogram,
            last_updated: Utc::now(),
        })
    }
}
