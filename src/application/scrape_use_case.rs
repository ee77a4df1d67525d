//! Full scrape for one app: clear, paginate, store, summarize, report
//!
//! Only an unknown app name or an unusable selector configuration stops a
//! run before it starts. Store faults are logged and the remaining steps
//! still run.

#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::errors::{ScrapeError, ScrapeResult};
use crate::domain::scrape_report::ScrapeReport;
use crate::infrastructure::parsing::ReviewListParser;

use super::metadata_summarizer::MetadataSummarizer;
use super::pagination_controller::{PaginationController, PaginationSettings};
use super::report_builder::ReportBuilder;
use super::state::AppState;

/// What a finished run produced, before it is turned into a response.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub report: ScrapeReport,
    /// Fetch fault that ended pagination, if any
    pub fetch_error: Option<String>,
    /// Set when the reviews could not be written
    pub persistence_error: Option<String>,
}

pub struct ScrapeUseCase {
    state: AppState,
    pagination: PaginationController,
    summarizer: MetadataSummarizer,
    reports: ReportBuilder,
}

impl ScrapeUseCase {
    pub fn new(state: &AppState) -> ScrapeResult<Self> {
        let parser = ReviewListParser::with_config(&state.config.selectors, Arc::clone(&state.fallback))
            .map_err(|e| ScrapeError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            pagination: PaginationController::new(
                Arc::clone(&state.fetcher),
                Arc::new(parser),
                PaginationSettings::from(&state.config.scraper),
            ),
            summarizer: MetadataSummarizer::new(Arc::clone(&state.fetcher), Arc::clone(&state.aggregator)),
            reports: ReportBuilder::new(Arc::clone(&state.store)),
            state: state.clone(),
        })
    }

    /// Replace the stored data for `app_name` with a fresh scrape.
    pub async fn execute(
        &self,
        app_name: &str,
        cancellation_token: &CancellationToken,
    ) -> ScrapeResult<ScrapeOutcome> {
        let app = self
            .state
            .config
            .find_app(app_name)
            .ok_or_else(|| ScrapeError::UnknownApp(app_name.to_string()))?
            .clone();

        let run_id = Uuid::new_v4();
        let span = info_span!("scrape", app = %app.name, run_id = %run_id);

        let outcome = async move {
            let today = self.state.clock.today();
            let store = &self.state.store;
            info!("Starting scrape for {} ({})", app.name, today);

            match store.clear_app_data(&app.name).await {
                Ok(cleared) => info!(
                    "Cleared {} reviews and {} metadata rows",
                    cleared.reviews, cleared.metadata
                ),
                Err(e) => warn!("Failed to clear existing data: {:#}", e),
            }

            let scrape = self.pagination.collect(&app, today, cancellation_token).await;

            let persistence_error = match store.insert_reviews(&app.name, scrape.reviews()).await {
                Ok(stored) => {
                    info!("Stored {} reviews", stored);
                    None
                }
                Err(e) => {
                    error!("Failed to store reviews: {:#}", e);
                    Some(ScrapeError::Persistence(format!("{e:#}")).to_string())
                }
            };

            if !cancellation_token.is_cancelled() {
                match self.summarizer.summarize(&app).await {
                    Ok(metadata) => {
                        if let Err(e) = store.upsert_metadata(&metadata).await {
                            error!("Failed to store metadata: {:#}", e);
                        }
                    }
                    Err(e) => warn!("Skipping metadata update: {}", e),
                }
            }

            let report = self.reports.build(&app.name, &scrape, today).await;
            info!(
                "Scrape finished: {} reviews ({} this month, {} synthetic), stop reason {}",
                report.last_30_days_count, report.this_month_count, report.synthetic_count, report.stop_reason
            );

            ScrapeOutcome {
                report,
                fetch_error: scrape.fetch_error().map(str::to_string),
                persistence_error,
            }
        }
        .instrument(span)
        .await;

        Ok(outcome)
    }
}
