pub mod analyzer;
pub mod checklist;
pub mod http;

pub use analyzer::{AnalysisReport, SeoService, HISTORY_LIMIT};
pub use checklist::evaluate;
pub use http::{Fetcher, HttpFetcher};
