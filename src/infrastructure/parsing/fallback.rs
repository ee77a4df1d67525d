//! Sample-data fallback providers
//!
//! Used when no container selector matches a listing page. Records from
//! here are always marked synthetic.

use chrono::NaiveDate;
use tracing::debug;

use super::date_normalizer::DateNormalizer;
use super::samples::{country_code, default_review_pool, SampleReview};
use crate::domain::review::Review;
use crate::domain::services::ReviewFallbackProvider;

/// Serves a fixed pool of sample reviews.
#[derive(Debug, Clone)]
pub struct SamplePoolFallback {
    pool: Vec<SampleReview>,
}

impl SamplePoolFallback {
    pub fn new() -> Self {
        Self::with_pool(default_review_pool())
    }

    pub fn with_pool(pool: Vec<SampleReview>) -> Self {
        Self { pool }
    }
}

impl Default for SamplePoolFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewFallbackProvider for SamplePoolFallback {
    fn fallback_reviews(&self, app_name: &str, today: NaiveDate) -> Vec<Review> {
        let normalizer = DateNormalizer::new(today);
        debug!("Serving {} sample reviews for {}", self.pool.len(), app_name);

        self.pool
            .iter()
            .map(|sample| {
                Review::synthetic(
                    app_name,
                    &sample.store_name,
                    country_code(&sample.country),
                    sample.rating,
                    &sample.content,
                    normalizer.normalize(&sample.date_text),
                )
            })
            .collect()
    }
}

/// Disables substitution: an unreadable page yields nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl ReviewFallbackProvider for NoFallback {
    fn fallback_reviews(&self, _app_name: &str, _today: NaiveDate) -> Vec<Review> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_pool_is_synthetic_and_dated() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let reviews = SamplePoolFallback::new().fallback_reviews("Vidify", today);

        assert_eq!(reviews.len(), 4);
        assert!(reviews.iter().all(|r| r.synthetic));
        assert!(reviews.iter().all(|r| r.source_app == "Vidify"));
        assert_eq!(reviews[0].review_date, NaiveDate::from_ymd_opt(2024, 12, 14).unwrap());
        assert_eq!(reviews[1].country_code, "JP");
    }

    #[test]
    fn test_no_fallback_is_empty() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(NoFallback.fallback_reviews("Vidify", today).is_empty());
    }
}
