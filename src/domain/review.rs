//! Review entity
//!
//! One review scraped from an app listing page, or substituted from the
//! fallback sample pool when the page structure could not be read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest star rating a listing page can express.
pub const MAX_RATING: u8 = 5;

/// A single normalized review.
///
/// `review_date` is always a calendar date; relative phrases such as
/// "3 days ago" are resolved before a `Review` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub source_app: String,
    pub store_name: String,
    /// Two-letter country code, e.g. "US"
    pub country_code: String,
    /// Star rating in `0..=5`
    pub rating: u8,
    pub content: String,
    pub review_date: NaiveDate,
    /// `true` when the record came from the sample pool rather than live markup
    pub synthetic: bool,
}

impl Review {
    /// Build a live review. The rating is clamped to `0..=5`.
    pub fn live(
        source_app: &str,
        store_name: &str,
        country_code: &str,
        rating: usize,
        content: &str,
        review_date: NaiveDate,
    ) -> Self {
        Self {
            source_app: source_app.to_string(),
            store_name: store_name.to_string(),
            country_code: country_code.to_string(),
            rating: clamp_rating(rating),
            content: content.to_string(),
            review_date,
            synthetic: false,
        }
    }

    /// Build a synthetic review from the sample pool.
    pub fn synthetic(
        source_app: &str,
        store_name: &str,
        country_code: &str,
        rating: usize,
        content: &str,
        review_date: NaiveDate,
    ) -> Self {
        Self {
            synthetic: true,
            ..Self::live(source_app, store_name, country_code, rating, content, review_date)
        }
    }

    /// Whether this review falls strictly before `cutoff`.
    pub fn is_older_than(&self, cutoff: NaiveDate) -> bool {
        self.review_date < cutoff
    }
}

/// Clamp a counted rating into the valid star range.
pub fn clamp_rating(count: usize) -> u8 {
    u8::try_from(count.min(usize::from(MAX_RATING))).unwrap_or(MAX_RATING)
}

/// Reviews yielded by one listing page, in page order.
pub type PageResult = Vec<Review>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rating_is_clamped() {
        let review = Review::live("Vidify", "Store", "US", 9, "ok", date(2024, 1, 1));
        assert_eq!(review.rating, 5);
        assert_eq!(clamp_rating(0), 0);
        assert_eq!(clamp_rating(3), 3);
    }

    #[test]
    fn test_synthetic_marker() {
        let live = Review::live("Vidify", "Store", "US", 4, "ok", date(2024, 1, 1));
        let sample = Review::synthetic("Vidify", "Store", "US", 4, "ok", date(2024, 1, 1));
        assert!(!live.synthetic);
        assert!(sample.synthetic);
    }

    #[test]
    fn test_is_older_than_is_strict() {
        let review = Review::live("Vidify", "Store", "US", 5, "ok", date(2024, 1, 10));
        assert!(!review.is_older_than(date(2024, 1, 10)));
        assert!(review.is_older_than(date(2024, 1, 11)));
    }
}
