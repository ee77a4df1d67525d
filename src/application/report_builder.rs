//! Run summary built from the accepted reviews and the stored data

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tracing::warn;

use crate::domain::repositories::ReviewStore;
use crate::domain::review::Review;
use crate::domain::scrape_report::ScrapeReport;
use crate::domain::scrape_session::CompletedScrape;

/// Reviews dated on or after the first day of `today`'s month.
pub fn count_this_month(reviews: &[Review], today: NaiveDate) -> usize {
    let month_start = today.with_day(1).unwrap_or(today);
    reviews.iter().filter(|r| r.review_date >= month_start).count()
}

pub struct ReportBuilder {
    store: Arc<dyn ReviewStore>,
}

impl ReportBuilder {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// The date range and stored total come from the store, not from memory,
    /// so they reflect what was actually persisted.
    pub async fn build(&self, app_name: &str, scrape: &CompletedScrape, today: NaiveDate) -> ScrapeReport {
        let date_range = self
            .store
            .query_date_range(app_name)
            .await
            .unwrap_or_else(|e| {
                warn!("Could not read stored date range for {}: {:#}", app_name, e);
                None
            });

        let total_stored_count = self.store.count_reviews(app_name).await.unwrap_or_else(|e| {
            warn!("Could not count stored reviews for {}: {:#}", app_name, e);
            0
        });

        ScrapeReport {
            app_name: app_name.to_string(),
            this_month_count: count_this_month(scrape.reviews(), today),
            last_30_days_count: scrape.reviews().len(),
            total_stored_count,
            date_range,
            pages_fetched: scrape.pages_fetched(),
            stop_reason: scrape.stop_reason(),
            stopped_due_to_age: scrape.stopped_due_to_age(),
            synthetic_count: scrape.synthetic_count(),
        }
    }
}
