//! SQLite-backed review store
//!
//! Reviews are replaced wholesale per app on every run: the use case clears
//! an app's rows first and inserts the new batch in one transaction at the
//! end. Metadata is a single row per app, upserted.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::sync::Arc;
use tracing::debug;

use crate::domain::app_metadata::{AppMetadata, StarHistogram};
use crate::domain::repositories::{ClearedCounts, ReviewStore};
use crate::domain::review::Review;
use crate::domain::scrape_report::DateRange;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct SqliteReviewStore {
    pool: Arc<SqlitePool>,
}

impl SqliteReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    fn parse_date(raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .with_context(|| format!("Stored review date is not a calendar date: {raw}"))
    }

    fn review_from_row(row: &SqliteRow) -> Result<Review> {
        let rating: i64 = row.try_get("rating")?;
        let review_date: String = row.try_get("review_date")?;

        Ok(Review {
            source_app: row.try_get("app_name")?,
            store_name: row.try_get("store_name")?,
            country_code: row.try_get("country_code")?,
            rating: u8::try_from(rating).context("Stored rating out of range")?,
            content: row.try_get("review_content")?,
            review_date: Self::parse_date(&review_date)?,
            synthetic: row.try_get("synthetic")?,
        })
    }

    fn metadata_from_row(row: &SqliteRow) -> Result<AppMetadata> {
        let mut star_histogram = StarHistogram::empty();
        for (stars, column) in [
            (5, "five_star_total"),
            (4, "four_star_total"),
            (3, "three_star_total"),
            (2, "two_star_total"),
            (1, "one_star_total"),
        ] {
            let count: i64 = row.try_get(column)?;
            star_histogram.set(stars, u32::try_from(count).unwrap_or(0));
        }

        let total_reviews: i64 = row.try_get("total_reviews")?;
        let last_updated: DateTime<Utc> = row.try_get("last_updated")?;

        Ok(AppMetadata {
            app_name: row.try_get("app_name")?,
            total_reviews: u32::try_from(total_reviews).unwrap_or(0),
            average_rating: row.try_get("overall_rating")?,
            star_histogram,
            last_updated,
        })
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn clear_app_data(&self, app_name: &str) -> Result<ClearedCounts> {
        let mut tx = self.pool.begin().await?;

        let reviews = sqlx::query("DELETE FROM reviews WHERE app_name = ?")
            .bind(app_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let metadata = sqlx::query("DELETE FROM app_metadata WHERE app_name = ?")
            .bind(app_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!("Cleared {} reviews and {} metadata rows for {}", reviews, metadata, app_name);
        Ok(ClearedCounts { reviews, metadata })
    }

    async fn insert_reviews(&self, app_name: &str, reviews: &[Review]) -> Result<u64> {
        if reviews.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let created_at = Utc::now();
        let mut inserted = 0;

        for review in reviews {
            inserted += sqlx::query(
                r#"
                INSERT INTO reviews
                (app_name, store_name, country_code, rating, review_content, review_date, synthetic, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(app_name)
            .bind(&review.store_name)
            .bind(&review.country_code)
            .bind(i64::from(review.rating))
            .bind(&review.content)
            .bind(review.review_date.format(DATE_FORMAT).to_string())
            .bind(review.synthetic)
            .bind(created_at)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        debug!("Inserted {} reviews for {}", inserted, app_name);
        Ok(inserted)
    }

    async fn upsert_metadata(&self, metadata: &AppMetadata) -> Result<()> {
        let histogram = &metadata.star_histogram;

        sqlx::query(
            r#"
            INSERT INTO app_metadata
            (app_name, total_reviews, overall_rating, five_star_total, four_star_total,
             three_star_total, two_star_total, one_star_total, last_updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(app_name) DO UPDATE SET
                total_reviews = excluded.total_reviews,
                overall_rating = excluded.overall_rating,
                five_star_total = excluded.five_star_total,
                four_star_total = excluded.four_star_total,
                three_star_total = excluded.three_star_total,
                two_star_total = excluded.two_star_total,
                one_star_total = excluded.one_star_total,
                last_updated = excluded.last_updated
            "#,
        )
        .bind(&metadata.app_name)
        .bind(i64::from(metadata.total_reviews))
        .bind(metadata.average_rating)
        .bind(i64::from(histogram.get(5)))
        .bind(i64::from(histogram.get(4)))
        .bind(i64::from(histogram.get(3)))
        .bind(i64::from(histogram.get(2)))
        .bind(i64::from(histogram.get(1)))
        .bind(metadata.last_updated)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    async fn query_date_range(&self, app_name: &str) -> Result<Option<DateRange>> {
        let row = sqlx::query(
            "SELECT MIN(review_date) AS min_date, MAX(review_date) AS max_date FROM reviews WHERE app_name = ?",
        )
        .bind(app_name)
        .fetch_one(&*self.pool)
        .await?;

        let min_date: Option<String> = row.try_get("min_date")?;
        let max_date: Option<String> = row.try_get("max_date")?;

        match (min_date, max_date) {
            (Some(min), Some(max)) => Ok(Some(DateRange {
                min_date: Self::parse_date(&min)?,
                max_date: Self::parse_date(&max)?,
            })),
            _ => Ok(None),
        }
    }

    async fn count_reviews(&self, app_name: &str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE app_name = ?")
            .bind(app_name)
            .fetch_one(&*self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find_reviews(&self, app_name: &str) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT app_name, store_name, country_code, rating, review_content, review_date, synthetic
            FROM reviews
            WHERE app_name = ?
            ORDER BY id ASC
            "#,
        )
        .bind(app_name)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(Self::review_from_row).collect()
    }

    async fn find_metadata(&self, app_name: &str) -> Result<Option<AppMetadata>> {
        let row = sqlx::query("SELECT * FROM app_metadata WHERE app_name = ?")
            .bind(app_name)
            .fetch_optional(&*self.pool)
            .await?;

        row.as_ref().map(Self::metadata_from_row).transpose()
    }

    async fn list_stored_apps(&self) -> Result<Vec<String>> {
        let apps = sqlx::query_scalar("SELECT DISTINCT app_name FROM reviews ORDER BY app_name")
            .fetch_all(&*self.pool)
            .await?;

        Ok(apps)
    }
}
