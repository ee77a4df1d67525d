// Database connection and pool management
// This module handles SQLite database connections using sqlx

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::debug;

use crate::infrastructure::config::defaults;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_max_connections(database_url, defaults::DB_MAX_CONNECTIONS).await
    }

    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self> {
        let db_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        if db_path != ":memory:" {
            if let Some(parent) = Path::new(db_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            // sqlx will not create a missing file from a plain `sqlite:` URL
            if !Path::new(db_path).exists() {
                tokio::fs::File::create(db_path)
                    .await
                    .with_context(|| format!("Failed to create database file {db_path}"))?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to {database_url}"))?;

        debug!("Connected to {}", database_url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        let create_reviews_sql = r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                app_name TEXT NOT NULL,
                store_name TEXT NOT NULL,
                country_code TEXT NOT NULL,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 0 AND 5),
                review_content TEXT NOT NULL,
                review_date DATE NOT NULL,
                synthetic BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        let create_metadata_sql = r#"
            CREATE TABLE IF NOT EXISTS app_metadata (
                app_name TEXT PRIMARY KEY,
                total_reviews INTEGER NOT NULL DEFAULT 0,
                overall_rating REAL NOT NULL DEFAULT 0,
                five_star_total INTEGER NOT NULL DEFAULT 0,
                four_star_total INTEGER NOT NULL DEFAULT 0,
                three_star_total INTEGER NOT NULL DEFAULT 0,
                two_star_total INTEGER NOT NULL DEFAULT 0,
                one_star_total INTEGER NOT NULL DEFAULT 0,
                last_updated DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#;

        let create_indexes_sql = r#"
            CREATE INDEX IF NOT EXISTS idx_reviews_app_name ON reviews (app_name);
            CREATE INDEX IF NOT EXISTS idx_reviews_app_date ON reviews (app_name, review_date);
        "#;

        sqlx::query(create_reviews_sql).execute(&self.pool).await?;
        sqlx::query(create_metadata_sql).execute(&self.pool).await?;
        sqlx::query(create_indexes_sql).execute(&self.pool).await?;

        Ok(())
    }
}
