//! Fault taxonomy for a scrape run
//!
//! Only `UnknownApp` and `InvalidConfiguration` end a run before it starts.
//! Every other variant is absorbed somewhere in the pipeline and turned into a stop reason, a
//! skipped container or a log line.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to extract review container {index}: {reason}")]
    Extraction { index: usize, reason: String },

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("unknown app: {0}")]
    UnknownApp(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ScrapeError {
    pub fn transport(url: &str, message: impl ToString) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
