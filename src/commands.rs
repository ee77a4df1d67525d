//! Command surface for triggering scrapes and listing apps
//!
//! Plain async functions over `AppState`. A scrape never returns an error
//! to its caller; faults come back inside `ScrapeAppResponse`.

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::application::{AppState, ScrapeAppResponse, ScrapeUseCase};
use crate::domain::errors::ScrapeError;

/// Clear, re-scrape and summarize one app.
pub async fn scrape_app(state: &AppState, app_name: &str) -> ScrapeAppResponse {
    scrape_app_with_cancellation(state, app_name, CancellationToken::new()).await
}

/// As `scrape_app`, stopping between pages once `cancellation_token` fires.
pub async fn scrape_app_with_cancellation(
    state: &AppState,
    app_name: &str,
    cancellation_token: CancellationToken,
) -> ScrapeAppResponse {
    info!("Scrape requested for {}", app_name);

    let result = match ScrapeUseCase::new(state) {
        Ok(use_case) => use_case.execute(app_name, &cancellation_token).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => ScrapeAppResponse::from_outcome(outcome, state.config.scraper.cutoff_days),
        Err(ScrapeError::UnknownApp(name)) => {
            error!("Unknown app requested: {}", name);
            ScrapeAppResponse::failure(format!("Unknown app: {name}"))
        }
        Err(e) => {
            error!("Scrape for {} could not start: {}", app_name, e);
            ScrapeAppResponse::failure(format!("Failed to fetch reviews for {app_name}: {e}"))
        }
    }
}

/// Names of every configured app, in configuration order.
pub fn list_available_apps(state: &AppState) -> Vec<String> {
    state.config.app_names()
}
