//! SQLite store for analysis history.
//!
//! The `analysis` table is append-only. Recency is creation order, which is
//! the autoincrement `id`, so listing never depends on clock precision.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::models::{AnalysisRecord, NewAnalysis};
use crate::repository::AnalysisStore;

#[derive(Clone)]
pub struct AnalysisRepository {
    pool: SqlitePool,
}

impl AnalysisRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM analysis")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count analyses")
    }
}

#[async_trait]
impl AnalysisStore for AnalysisRepository {
    async fn insert(&self, analysis: &NewAnalysis) -> Result<AnalysisRecord> {
        let created_at = Utc::now();

        let id = sqlx::query(
            r#"
            INSERT INTO analysis (url, title, score, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&analysis.url)
        .bind(&analysis.title)
        .bind(i64::from(analysis.score))
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to insert analysis")?
        .last_insert_rowid();

        tracing::info!("Saved analysis {} for URL: {}", id, analysis.url);

        Ok(AnalysisRecord {
            id,
            url: analysis.url.clone(),
            title: analysis.title.clone(),
            score: analysis.score,
            created_at,
        })
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, url, title, score, created_at
            FROM analysis
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch analysis history")?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn delete_all(&self) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM analysis")
            .execute(&self.pool)
            .await
            .context("Failed to clear analysis history")?
            .rows_affected();

        tracing::info!("Deleted {} analysis records", deleted);
        Ok(deleted)
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> AnalysisRecord {
    AnalysisRecord {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        score: row.get::<i64, _>("score").clamp(0, 100) as u8,
        created_at: parse_datetime(row.get("created_at")),
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
