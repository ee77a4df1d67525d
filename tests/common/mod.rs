//! Shared fixtures: a scripted fetcher, listing markup builders and a
//! temp-file SQLite store.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use app_review_scraper_lib::application::AppState;
use app_review_scraper_lib::domain::app_metadata::AppMetadata;
use app_review_scraper_lib::domain::clock::FixedClock;
use app_review_scraper_lib::domain::errors::{ScrapeError, ScrapeResult};
use app_review_scraper_lib::domain::repositories::{ClearedCounts, ReviewStore};
use app_review_scraper_lib::domain::review::Review;
use app_review_scraper_lib::domain::scrape_report::DateRange;
use app_review_scraper_lib::domain::services::{FetchedPage, PageFetcher};
use app_review_scraper_lib::infrastructure::config::AppConfig;
use app_review_scraper_lib::infrastructure::{DatabaseConnection, SqliteReviewStore};

pub const VIDIFY_METADATA_URL: &str = "https://apps.shopify.com/vidify/reviews";

pub fn vidify_page_url(page: u32) -> String {
    format!("https://apps.shopify.com/vidify/reviews?sort_by=newest&page={page}")
}

enum Scripted {
    Page(FetchedPage),
    TransportError(String),
}

/// Answers from a fixed script and records every URL requested.
/// Unscripted URLs answer 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: Mutex<HashMap<String, Scripted>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(url.to_string(), Scripted::Page(FetchedPage::ok(body)));
        self
    }

    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.script.lock().unwrap().insert(
            url.to_string(),
            Scripted::Page(FetchedPage {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub fn with_transport_error(self, url: &str, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(url.to_string(), Scripted::TransportError(message.to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requested.lock().unwrap().iter().any(|u| u == url)
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn get(&self, url: &str) -> ScrapeResult<FetchedPage> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.script.lock().unwrap().get(url) {
            Some(Scripted::Page(page)) => Ok(page.clone()),
            Some(Scripted::TransportError(message)) => Err(ScrapeError::transport(url, message)),
            None => Ok(FetchedPage {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

/// A store whose every operation fails except the metadata upsert,
/// which is counted.
#[derive(Default)]
pub struct FailingStore {
    upserts: AtomicUsize,
    inserted_batches: AtomicUsize,
}

impl FailingStore {
    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn inserted_batches(&self) -> usize {
        self.inserted_batches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewStore for FailingStore {
    async fn clear_app_data(&self, _app_name: &str) -> Result<ClearedCounts> {
        Err(anyhow!("database is locked"))
    }

    async fn insert_reviews(&self, _app_name: &str, _reviews: &[Review]) -> Result<u64> {
        self.inserted_batches.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("disk I/O error"))
    }

    async fn upsert_metadata(&self, _metadata: &AppMetadata) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn query_date_range(&self, _app_name: &str) -> Result<Option<DateRange>> {
        Err(anyhow!("database is locked"))
    }

    async fn count_reviews(&self, _app_name: &str) -> Result<u64> {
        Err(anyhow!("database is locked"))
    }

    async fn find_reviews(&self, _app_name: &str) -> Result<Vec<Review>> {
        Err(anyhow!("database is locked"))
    }

    async fn find_metadata(&self, _app_name: &str) -> Result<Option<AppMetadata>> {
        Err(anyhow!("database is locked"))
    }

    async fn list_stored_apps(&self) -> Result<Vec<String>> {
        Err(anyhow!("database is locked"))
    }
}

/// One review container in the listing markup.
pub fn review_block(stars: usize, date: &str, text: &str) -> String {
    let filled = r#"<svg class="tw-fill-fg-primary"></svg>"#.repeat(stars);
    format!(
        r#"<div data-review-content-id="r">
             <div class="stars">{filled}</div>
             <div class="tw-text-body-xs tw-text-fg-tertiary">{date}</div>
             <p class="tw-break-words">{text}</p>
           </div>"#
    )
}

/// A listing page holding one container per `(date, text)` pair.
pub fn listing_page(reviews: &[(&str, &str)]) -> String {
    let blocks: String = reviews
        .iter()
        .map(|(date, text)| review_block(5, date, text))
        .collect();
    format!("<html><body><main>{blocks}</main></body></html>")
}

/// A page with no review containers at all.
pub fn unstructured_page() -> String {
    "<html><body><h1>Something changed</h1><p>No listing here</p></body></html>".to_string()
}

pub fn metadata_page(total: u32, rating: f64) -> String {
    format!("<html><body><h2>Reviews ({total})</h2><div>Overall rating {rating}</div></body></html>")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Default catalog with no politeness delay.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::with_default_catalog();
    config.scraper.page_delay_ms = 0;
    config
}

pub async fn temp_store() -> (TempDir, Arc<SqliteReviewStore>) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("reviews.db").display());
    let db = DatabaseConnection::new(&url).await.unwrap();
    db.migrate().await.unwrap();
    (dir, Arc::new(SqliteReviewStore::new(db.pool().clone())))
}

pub fn state_with(
    config: AppConfig,
    store: Arc<SqliteReviewStore>,
    fetcher: Arc<ScriptedFetcher>,
    today: NaiveDate,
) -> AppState {
    state_with_store(config, store, fetcher, today)
}

pub fn state_with_store(
    config: AppConfig,
    store: Arc<dyn ReviewStore>,
    fetcher: Arc<ScriptedFetcher>,
    today: NaiveDate,
) -> AppState {
    AppState::new(config, store, fetcher).with_clock(Arc::new(FixedClock(today)))
}
