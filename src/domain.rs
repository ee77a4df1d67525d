//! Domain module - Core entities and collaborator interfaces
//!
//! Plain data for reviews, metadata and run outcomes, plus the traits the
//! pipeline depends on (store, fetcher, fallback, histogram aggregation).

pub mod app_metadata;
pub mod clock;
pub mod errors;
pub mod repositories;
pub mod review;
pub mod scrape_report;
pub mod scrape_session;
pub mod services;

// Re-export commonly used items for convenience
pub use app_metadata::{AppMetadata, StarHistogram};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ScrapeError, ScrapeResult};
pub use repositories::{ClearedCounts, ReviewStore};
pub use review::{PageResult, Review};
pub use scrape_report::{DateRange, ScrapeReport};
pub use scrape_session::{CompletedScrape, ScrapeAccumulator, StopReason};
pub use services::{FetchedPage, PageFetcher, ReviewFallbackProvider, StarHistogramAggregator};
