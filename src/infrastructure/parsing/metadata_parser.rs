//! Listing-level figures from the reviews landing page
//!
//! The page markup changes often, so this reads the raw text with two
//! patterns instead of walking the DOM.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::app_metadata::StarHistogram;
use crate::domain::review::MAX_RATING;
use crate::domain::services::StarHistogramAggregator;

// Labels and figures are often split by markup, e.g. `<span>Overall rating</span> 4.8`
static TOTAL_REVIEWS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Reviews(?:\s|<[^>]*>)*\((?:\s|<[^>]*>)*([\d,]+)(?:\s|<[^>]*>)*\)").unwrap()
});
static OVERALL_RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Overall rating(?:\s|<[^>]*>)*(\d+(?:\.\d+)?)").unwrap());

/// Figures found on the page; `None` where the pattern did not match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListingFigures {
    pub total_reviews: Option<u32>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataParser;

impl MetadataParser {
    pub const fn new() -> Self {
        Self
    }

    pub fn parse(&self, body: &str) -> ListingFigures {
        ListingFigures {
            total_reviews: Self::total_reviews(body),
            average_rating: Self::average_rating(body),
        }
    }

    /// "Reviews (1,234)" -> 1234
    pub fn total_reviews(body: &str) -> Option<u32> {
        TOTAL_REVIEWS_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse().ok())
    }

    pub fn average_rating(body: &str) -> Option<f64> {
        OVERALL_RATING_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Attributes every review to the top bucket.
///
/// Stands in until the per-star breakdown is read from the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHistogram;

impl StarHistogramAggregator for PlaceholderHistogram {
    fn aggregate(&self, total_reviews: u32, _average_rating: f64, _markup: &str) -> StarHistogram {
        let mut histogram = StarHistogram::empty();
        histogram.set(MAX_RATING, total_reviews);
        histogram
    }
}
