//! Aggregate metadata for one app listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::review::MAX_RATING;

/// Count of reviews per star rating (1..=5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarHistogram(BTreeMap<u8, u32>);

impl StarHistogram {
    /// Histogram with every bucket at zero.
    pub fn empty() -> Self {
        Self((1..=MAX_RATING).map(|stars| (stars, 0)).collect())
    }

    /// Set the count for a bucket. Ratings outside `1..=5` are ignored.
    pub fn set(&mut self, stars: u8, count: u32) {
        if (1..=MAX_RATING).contains(&stars) {
            self.0.insert(stars, count);
        }
    }

    pub fn get(&self, stars: u8) -> u32 {
        self.0.get(&stars).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl Default for StarHistogram {
    fn default() -> Self {
        Self::empty()
    }
}

/// One row per app, overwritten on every scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub app_name: String,
    pub total_reviews: u32,
    pub average_rating: f64,
    pub star_histogram: StarHistogram,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_buckets() {
        let mut histogram = StarHistogram::empty();
        histogram.set(5, 8);
        histogram.set(2, 1);
        histogram.set(0, 99);
        histogram.set(6, 99);

        assert_eq!(histogram.get(5), 8);
        assert_eq!(histogram.get(2), 1);
        assert_eq!(histogram.get(0), 0);
        assert_eq!(histogram.total(), 9);
    }
}
