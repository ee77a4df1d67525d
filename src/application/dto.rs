//! Data Transfer Objects returned by the command surface

use serde::{Deserialize, Serialize};

use crate::domain::scrape_report::ScrapeReport;
use crate::domain::scrape_session::StopReason;

use super::scrape_use_case::ScrapeOutcome;

/// Result of one scrape trigger. Never an error: every fault is folded
/// into `success` and `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeAppResponse {
    pub success: bool,
    pub scraped_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ScrapeReport>,
}

impl ScrapeAppResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            scraped_count: 0,
            message: Some(message.into()),
            report: None,
        }
    }

    /// Map a finished run to the user-facing result.
    ///
    /// "Nothing new in the window" is a success; a first-page fetch failure,
    /// cancellation or a failed insert is not.
    pub fn from_outcome(outcome: ScrapeOutcome, cutoff_days: u32) -> Self {
        let app = outcome.report.app_name.clone();
        let scraped_count = outcome.report.last_30_days_count;

        let (success, message) = match (outcome.report.stop_reason, outcome.persistence_error) {
            (StopReason::FetchError, _) => (
                false,
                format!(
                    "Failed to fetch reviews for {}: {}",
                    app,
                    outcome.fetch_error.as_deref().unwrap_or("no response")
                ),
            ),
            (StopReason::Cancelled, _) => (false, format!("Scrape cancelled for {app}")),
            (_, Some(error)) => (false, format!("Failed to store reviews for {app}: {error}")),
            _ if scraped_count == 0 => (
                true,
                format!("No live reviews found in the last {cutoff_days} days for {app}"),
            ),
            _ => (true, format!("Scraped {scraped_count} reviews for {app}")),
        };

        Self {
            success,
            scraped_count,
            message: Some(message),
            report: Some(outcome.report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(stop_reason: StopReason, count: usize) -> ScrapeOutcome {
        ScrapeOutcome {
            report: ScrapeReport {
                app_name: "Vidify".to_string(),
                this_month_count: 0,
                last_30_days_count: count,
                total_stored_count: count as u64,
                date_range: None,
                pages_fetched: 1,
                stop_reason,
                stopped_due_to_age: false,
                synthetic_count: 0,
            },
            fetch_error: None,
            persistence_error: None,
        }
    }

    #[test]
    fn test_success_message() {
        let response = ScrapeAppResponse::from_outcome(outcome(StopReason::AgeCutoff, 3), 30);
        assert!(response.success);
        assert_eq!(response.scraped_count, 3);
        assert_eq!(response.message.as_deref(), Some("Scraped 3 reviews for Vidify"));
    }

    #[test]
    fn test_empty_window_is_still_success() {
        let response = ScrapeAppResponse::from_outcome(outcome(StopReason::NoMoreReviews, 0), 30);
        assert!(response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("No live reviews found in the last 30 days for Vidify")
        );
    }

    #[test]
    fn test_first_page_failure() {
        let mut failed = outcome(StopReason::FetchError, 0);
        failed.fetch_error = Some("HTTP error 503".to_string());
        let response = ScrapeAppResponse::from_outcome(failed, 30);

        assert!(!response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("Failed to fetch reviews for Vidify: HTTP error 503")
        );
    }

    #[test]
    fn test_persistence_failure() {
        let mut failed = outcome(StopReason::AgeCutoff, 2);
        failed.persistence_error = Some("disk full".to_string());
        let response = ScrapeAppResponse::from_outcome(failed, 30);
        assert!(!response.success);
        assert_eq!(response.scraped_count, 2);
    }

    #[test]
    fn test_serialized_shape_omits_absent_fields() {
        let json = serde_json::to_value(ScrapeAppResponse::failure("Unknown app: Foo")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["scraped_count"], 0);
        assert!(json.get("report").is_none());
    }
}
