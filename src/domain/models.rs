//! Domain entities for page analysis and history

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title persisted when the page carries no usable `<title>`.
pub const NO_TITLE: &str = "No Title";

/// Upper bound applied to every computed score.
pub const MAX_SCORE: u32 = 100;

// ====== Persisted entity ======

/// One stored analysis. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRecord {
    #[serde(skip_serializing)]
    pub id: i64,
    pub url: String,
    pub title: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysis {
    pub url: String,
    pub title: String,
    pub score: u8,
}

impl NewAnalysis {
    pub fn new(url: impl Into<String>, title: Option<String>, score: u8) -> Self {
        Self {
            url: url.into(),
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            score,
        }
    }
}

// ====== Checklist results ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Pass,
    Fail,
    Warn,
}

impl CheckState {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckState::Pass => "✅",
            CheckState::Fail => "❌",
            CheckState::Warn => "⚠️",
        }
    }
}

/// Result of a single checklist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub key: &'static str,
    pub state: CheckState,
    /// Points awarded; zero unless `state` is `Pass`.
    pub points: u32,
    pub detail: String,
}

impl CheckOutcome {
    pub fn pass(key: &'static str, points: u32, detail: impl Into<String>) -> Self {
        Self {
            key,
            state: CheckState::Pass,
            points,
            detail: detail.into(),
        }
    }

    pub fn fail(key: &'static str, detail: impl Into<String>) -> Self {
        Self {
            key,
            state: CheckState::Fail,
            points: 0,
            detail: detail.into(),
        }
    }

    pub fn warn(key: &'static str, detail: impl Into<String>) -> Self {
        Self {
            key,
            state: CheckState::Warn,
            points: 0,
            detail: detail.into(),
        }
    }

    pub fn passed(&self) -> bool {
        self.state == CheckState::Pass
    }

    /// Human-readable status, e.g. `✅ Present` or `❌ Missing - Add a canonical tag.`
    pub fn status(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.state.symbol(), self.detail)
    }
}

/// Output of the checklist evaluator: capped score plus one outcome per check performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: u8,
    pub outcomes: Vec<CheckOutcome>,
}

impl Evaluation {
    /// Fold outcomes into a total, capped at [`MAX_SCORE`].
    pub fn from_outcomes(outcomes: Vec<CheckOutcome>) -> Self {
        let total = outcomes
            .iter()
            .fold(0u32, |acc, o| acc.saturating_add(o.points));
        Self {
            score: total.min(MAX_SCORE) as u8,
            outcomes,
        }
    }

    pub fn outcome(&self, key: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.key == key)
    }

    /// Check name to status string, ordered by key.
    pub fn checks(&self) -> BTreeMap<String, String> {
        self.outcomes
            .iter()
            .map(|o| (o.key.to_string(), o.status()))
            .collect()
    }
}
