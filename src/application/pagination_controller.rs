//! Page-by-page review collection with the age cutoff
//!
//! Pages are assumed newest-first. The first record older than the cutoff
//! ends the whole run, together with everything after it on that page.

#![allow(clippy::uninlined_format_args)]

use chrono::{Days, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::errors::ScrapeError;
use crate::domain::review::Review;
use crate::domain::scrape_session::{CompletedScrape, ScrapeAccumulator, StopReason};
use crate::domain::services::{FetchedPage, PageFetcher};
use crate::infrastructure::config::{AppCatalogEntry, ScraperConfig};
use crate::infrastructure::parsing::{ParseContext, ReviewListParser};

/// Loop bounds taken from `ScraperConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub max_pages: u32,
    pub page_delay: Duration,
    pub cutoff_days: u32,
}

impl From<&ScraperConfig> for PaginationSettings {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            page_delay: config.page_delay(),
            cutoff_days: config.cutoff_days,
        }
    }
}

/// Oldest date still inside the window. A review dated exactly on the
/// cutoff is kept; anything before it stops the run.
pub fn cutoff_date(today: NaiveDate, cutoff_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(cutoff_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Split a page at the first review older than `cutoff`.
///
/// Returns the accepted prefix and whether a stale review was found.
pub fn accept_until_cutoff(reviews: Vec<Review>, cutoff: NaiveDate) -> (Vec<Review>, bool) {
    let mut accepted = Vec::with_capacity(reviews.len());
    for review in reviews {
        if review.is_older_than(cutoff) {
            return (accepted, true);
        }
        accepted.push(review);
    }
    (accepted, false)
}

pub struct PaginationController {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<ReviewListParser>,
    settings: PaginationSettings,
}

impl PaginationController {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: Arc<ReviewListParser>,
        settings: PaginationSettings,
    ) -> Self {
        Self {
            fetcher,
            parser,
            settings,
        }
    }

    pub const fn settings(&self) -> &PaginationSettings {
        &self.settings
    }

    /// Fetch one page, folding non-200 statuses into `HttpStatus`.
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let page = self.fetcher.get(url).await?;
        if page.is_success() {
            Ok(page)
        } else {
            Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: page.status,
            })
        }
    }

    /// Run the loop to a terminal state. Cancellation is honoured between
    /// pages and during the politeness delay, never mid-page.
    pub async fn collect(
        &self,
        app: &AppCatalogEntry,
        today: NaiveDate,
        cancellation_token: &CancellationToken,
    ) -> CompletedScrape {
        let cutoff = cutoff_date(today, self.settings.cutoff_days);
        let mut accumulator = ScrapeAccumulator::new();
        let mut context = ParseContext::new(&app.name, today);
        let mut page: u32 = 1;

        info!(
            "Collecting reviews for {} (cutoff {}, max {} pages)",
            app.name, cutoff, self.settings.max_pages
        );

        let stop_reason = loop {
            if cancellation_token.is_cancelled() {
                break StopReason::Cancelled;
            }
            if page > self.settings.max_pages {
                break StopReason::SafetyLimit;
            }

            let url = app.listing_url(page);
            let fetched = match self.fetch_page(&url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!("Fetch failed on page {}: {}", page, e);
                    accumulator.record_fetch_error(e.to_string());
                    break if page == 1 {
                        StopReason::FetchError
                    } else {
                        StopReason::Exhausted
                    };
                }
            };
            accumulator.mark_page_fetched();

            // Parsed synchronously; the DOM never lives across an await
            context.at_page(page);
            let extraction = self.parser.parse_document(&fetched.body, &mut context);
            if extraction.is_empty() {
                debug!("Page {} yielded no reviews", page);
                break StopReason::NoMoreReviews;
            }

            let found = extraction.reviews.len();
            let (accepted, hit_cutoff) = accept_until_cutoff(extraction.reviews, cutoff);
            debug!("Page {}: accepted {} of {} reviews", page, accepted.len(), found);
            for review in accepted {
                accumulator.push(review);
            }

            if hit_cutoff {
                info!("Reached reviews older than {} on page {}", cutoff, page);
                accumulator.mark_stopped_due_to_age();
                break StopReason::AgeCutoff;
            }

            page += 1;
            if page > self.settings.max_pages {
                warn!("Stopped at the {} page safety limit", self.settings.max_pages);
                break StopReason::SafetyLimit;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.page_delay) => {}
                _ = cancellation_token.cancelled() => break StopReason::Cancelled,
            }
        };

        info!(
            "Pagination for {} finished: {} ({} reviews, {} pages)",
            app.name,
            stop_reason,
            accumulator.len(),
            accumulator.pages_fetched()
        );
        accumulator.finalize(stop_reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap() - chrono::Duration::days(offset)
    }

    fn review_aged(offset: i64) -> Review {
        Review::live("Vidify", "s", "US", 5, &format!("{offset}"), day(offset))
    }

    #[test]
    fn test_cutoff_date_is_inclusive() {
        let cutoff = cutoff_date(day(0), 30);
        assert_eq!(cutoff, day(30));
        assert!(!review_aged(30).is_older_than(cutoff));
        assert!(review_aged(31).is_older_than(cutoff));
    }

    #[test]
    fn test_stale_review_discards_rest_of_page() {
        let page = vec![review_aged(1), review_aged(40), review_aged(2)];
        let (accepted, hit) = accept_until_cutoff(page, day(30));

        assert!(hit);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].content, "1");
    }

    #[test]
    fn test_fresh_page_is_kept_whole() {
        let page = vec![review_aged(0), review_aged(30)];
        let (accepted, hit) = accept_until_cutoff(page, day(30));
        assert!(!hit);
        assert_eq!(accepted.len(), 2);
    }

    proptest! {
        #[test]
        fn accepted_reviews_are_the_prefix_before_the_first_stale_one(
            ages in prop::collection::vec(0i64..60, 0..40)
        ) {
            let cutoff = day(30);
            let page: Vec<Review> = ages.iter().map(|&a| review_aged(a)).collect();
            let (accepted, hit) = accept_until_cutoff(page.clone(), cutoff);

            let expected = ages.iter().take_while(|&&a| a <= 30).count();
            prop_assert_eq!(accepted.len(), expected);
            prop_assert_eq!(&accepted[..], &page[..expected]);
            prop_assert_eq!(hit, expected < ages.len());
        }
    }
}
