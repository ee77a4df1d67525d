//! Summary of a finished scrape

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scrape_session::StopReason;

/// Oldest and newest review date currently stored for an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

/// Derived from one run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub app_name: String,
    pub this_month_count: usize,
    pub last_30_days_count: usize,
    pub total_stored_count: u64,
    pub date_range: Option<DateRange>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
    pub stopped_due_to_age: bool,
    pub synthetic_count: usize,
}
