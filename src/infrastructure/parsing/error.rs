//! Parsing error types for review listing extraction
//!
//! Selector compilation problems surface when a parser is built; per-container
//! faults surface while a page is walked and are skipped by the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No valid selectors compiled for '{field}': {errors}")]
    NoValidSelectors { field: String, errors: String },

    #[error("Sample pool '{pool}' is empty")]
    EmptySamplePool { pool: String },
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty_sample_pool(pool: &str) -> Self {
        Self::EmptySamplePool {
            pool: pool.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
