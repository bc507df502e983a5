//! Single-page analysis workflow.
//!
//! fetch → parse → evaluate → reject script-rendered shells → persist.

use std::collections::BTreeMap;
use std::sync::Arc;

use scraper::Html;
use serde::Serialize;

use crate::domain::{AnalysisRecord, Evaluation, NewAnalysis};
use crate::error::{AppError, Result};
use crate::extractor::PageExtractor;
use crate::repository::AnalysisStore;
use crate::service::checklist;
use crate::service::http::Fetcher;

/// Number of records returned by [`SeoService::history`].
pub const HISTORY_LIMIT: u32 = 10;

/// Response body of a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub seo_score: u8,
    pub seo_checks: BTreeMap<String, String>,
}

impl From<&Evaluation> for AnalysisReport {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            seo_score: evaluation.score,
            seo_checks: evaluation.checks(),
        }
    }
}

/// What the parsed page yielded; the document itself never leaves `inspect`.
#[derive(Debug)]
struct PageInspection {
    evaluation: Evaluation,
    title: Option<String>,
}

/// Parse and score a page body.
///
/// Pages with neither a `<title>` nor any `<meta>` are treated as
/// script-rendered and rejected with [`AppError::EmptyContent`].
fn inspect(body: &str, url: &str) -> Result<PageInspection> {
    let document = Html::parse_document(body);
    let evaluation = checklist::evaluate(&document, Some(url));

    if !PageExtractor::has_title(&document) && !PageExtractor::has_any_meta(&document) {
        return Err(AppError::EmptyContent);
    }

    Ok(PageInspection {
        evaluation,
        title: PageExtractor::extract_title(&document),
    })
}

/// Application service shared by every request handler.
#[derive(Clone)]
pub struct SeoService {
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn AnalysisStore>,
}

impl SeoService {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: Arc<dyn AnalysisStore>) -> Self {
        Self { fetcher, store }
    }

    /// Fetch `url`, score it and record the result.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport> {
        tracing::info!("[ANALYZE] Fetching {}", url);
        let body = self.fetcher.fetch(url).await?;

        let page = inspect(&body, url)?;
        tracing::info!("[ANALYZE] {} scored {}", url, page.evaluation.score);

        self.store
            .insert(&NewAnalysis::new(url, page.title, page.evaluation.score))
            .await
            .map_err(|e| AppError::database(format!("{:#}", e)))?;

        Ok(AnalysisReport::from(&page.evaluation))
    }

    /// The [`HISTORY_LIMIT`] most recent analyses, newest first.
    pub async fn history(&self) -> Result<Vec<AnalysisRecord>> {
        self.recent(HISTORY_LIMIT).await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>> {
        self.store
            .list_recent(limit)
            .await
            .map_err(|e| AppError::database(format!("{:#}", e)))
    }

    /// Delete every stored analysis; returns the number removed.
    pub async fn clear_history(&self) -> Result<u64> {
        let deleted = self
            .store
            .delete_all()
            .await
            .map_err(|e| AppError::database(format!("{:#}", e)))?;
        tracing::info!("[HISTORY] Cleared {} records", deleted);
        Ok(deleted)
    }
}
