//! Collaborator seams used by the scraping pipeline
//!
//! Network access, the sample-data fallback and the star-histogram
//! aggregation are all injected so each can be swapped in tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::app_metadata::StarHistogram;
use super::errors::ScrapeResult;
use super::review::Review;

/// Raw response for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Only a plain 200 counts as a usable page.
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// One HTTP GET. Headers and timeout belong to the implementation.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// `Err` means a transport fault (connect, timeout, body read).
    /// Any HTTP status, including errors, comes back as `Ok`.
    async fn get(&self, url: &str) -> ScrapeResult<FetchedPage>;
}

/// Supplies stand-in reviews when no container selector matches a page.
pub trait ReviewFallbackProvider: Send + Sync {
    /// Reviews to use as the page's full yield. Every record must be
    /// marked synthetic. An empty vec disables substitution.
    fn fallback_reviews(&self, app_name: &str, today: NaiveDate) -> Vec<Review>;
}

/// Builds the per-star breakdown stored with app metadata.
pub trait StarHistogramAggregator: Send + Sync {
    fn aggregate(&self, total_reviews: u32, average_rating: f64, markup: &str) -> StarHistogram;
}
