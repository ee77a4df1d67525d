//! Selector configuration for review listing pages
//!
//! Container selectors are an ordered priority list: the first one that
//! matches anything on a page wins and the rest are never consulted.

use serde::{Deserialize, Serialize};

/// CSS selectors for review listing pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReviewListSelectors {
    /// Review container selectors, highest priority first
    pub container: Vec<String>,

    /// Filled-star markers inside a container; the match count is the rating
    pub filled_star: String,

    /// Review body text block
    pub content: String,

    /// Primary date element
    pub date: String,

    /// Date element used when the primary one is absent
    pub secondary_date: String,
}

impl Default for ReviewListSelectors {
    fn default() -> Self {
        Self {
            container: vec![
                "div[data-review-content-id]".to_string(),
                "div[class*='review-listing-item']".to_string(),
                "div[class*='review']".to_string(),
            ],
            filled_star: "svg[class*='tw-fill-fg-primary']".to_string(),
            content: "p[class='tw-break-words']".to_string(),
            date: "time".to_string(),
            secondary_date: "div[class*='tw-text-body-xs'][class*='tw-text-fg-tertiary']".to_string(),
        }
    }
}
