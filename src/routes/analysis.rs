use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::AnalysisRecord;
use crate::error::{AppError, Result};
use crate::service::{AnalysisReport, SeoService};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /analyze — score one page and record it.
pub async fn analyze(
    State(service): State<SeoService>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    if request.url.trim().is_empty() {
        return Err(AppError::InvalidRequest("url must not be empty".to_string()));
    }

    tracing::info!("Starting analysis: {}", request.url);
    let report = service.analyze(&request.url).await?;
    Ok(Json(report))
}

/// GET /history — most recent analyses, newest first.
pub async fn history(State(service): State<SeoService>) -> Result<Json<Vec<AnalysisRecord>>> {
    let records = service.history().await?;
    Ok(Json(records))
}

/// DELETE /clear-history — drop every stored analysis.
pub async fn clear_history(State(service): State<SeoService>) -> Result<Json<MessageResponse>> {
    let deleted = service.clear_history().await?;
    Ok(Json(MessageResponse {
        message: format!("Deleted {} records.", deleted),
    }))
}
