use async_trait::async_trait;
use anyhow::Result;
use crate::domain::models::*;

pub mod sqlite;

/// Append-only persistence for analysis results.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Store one analysis and return the stored record.
    async fn insert(&self, analysis: &NewAnalysis) -> Result<AnalysisRecord>;
    /// Most recent `limit` records, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>>;
    /// Remove every record; returns how many were removed.
    async fn delete_all(&self) -> Result<u64>;
}
