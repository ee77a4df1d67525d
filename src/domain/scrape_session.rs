//! State of one pagination run
//!
//! `ScrapeAccumulator` is appended to page by page while the run is live and
//! turns into a read-only `CompletedScrape` once the loop reaches a terminal
//! state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::review::Review;

/// Why pagination stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The first page could not be fetched
    FetchError,
    /// A later page could not be fetched; treated as the end of the listing
    Exhausted,
    /// A page yielded no reviews
    NoMoreReviews,
    /// A review older than the cutoff window was found
    AgeCutoff,
    /// The page-count cap was reached
    SafetyLimit,
    /// The caller cancelled between pages
    Cancelled,
}

impl StopReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchError => "fetch_error",
            Self::Exhausted => "exhausted",
            Self::NoMoreReviews => "no_more_reviews",
            Self::AgeCutoff => "age_cutoff",
            Self::SafetyLimit => "safety_limit",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted reviews across pages, in encounter order.
#[derive(Debug, Default)]
pub struct ScrapeAccumulator {
    reviews: Vec<Review>,
    stopped_due_to_age: bool,
    pages_fetched: u32,
    fetch_error: Option<String>,
}

impl ScrapeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn mark_page_fetched(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn mark_stopped_due_to_age(&mut self) {
        self.stopped_due_to_age = true;
    }

    pub fn record_fetch_error(&mut self, message: impl Into<String>) {
        self.fetch_error = Some(message.into());
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Close the run. No further reviews can be added after this.
    pub fn finalize(self, stop_reason: StopReason) -> CompletedScrape {
        CompletedScrape {
            reviews: self.reviews,
            stopped_due_to_age: self.stopped_due_to_age,
            pages_fetched: self.pages_fetched,
            stop_reason,
            fetch_error: self.fetch_error,
        }
    }
}

/// Finalized, read-only outcome of a pagination run.
#[derive(Debug, Clone)]
pub struct CompletedScrape {
    reviews: Vec<Review>,
    stopped_due_to_age: bool,
    pages_fetched: u32,
    stop_reason: StopReason,
    fetch_error: Option<String>,
}

impl CompletedScrape {
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub const fn stopped_due_to_age(&self) -> bool {
        self.stopped_due_to_age
    }

    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub const fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn synthetic_count(&self) -> usize {
        self.reviews.iter().filter(|r| r.synthetic).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_finalize_keeps_encounter_order() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut acc = ScrapeAccumulator::new();
        acc.mark_page_fetched();
        acc.push(Review::live("A", "s1", "US", 5, "first", date));
        acc.push(Review::synthetic("A", "s2", "US", 5, "second", date));
        acc.mark_stopped_due_to_age();

        let done = acc.finalize(StopReason::AgeCutoff);
        assert_eq!(done.reviews()[0].content, "first");
        assert_eq!(done.reviews()[1].content, "second");
        assert_eq!(done.pages_fetched(), 1);
        assert_eq!(done.synthetic_count(), 1);
        assert!(done.stopped_due_to_age());
        assert_eq!(done.stop_reason().to_string(), "age_cutoff");
    }
}
