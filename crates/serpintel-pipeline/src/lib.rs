//! Keyword-analysis orchestration.
//!
//! Drives the DataForSEO fetchers over a keyword list and produces one
//! complete [`KeywordResult`] per input keyword, in input order, no matter
//! which per-keyword fetches fail along the way. Exactly one failure class
//! aborts the whole run — the bulk metrics call that every record depends
//! on. Everything else degrades the affected keyword to defaults and moves
//! on.
//!
//! The crate also owns the pre-acquisition [cost projection](estimate_cost)
//! and the [`Summarizer`] contract for the downstream classification step.

mod analyzer;
mod cost;
mod error;
mod summary;
mod types;

pub use analyzer::{KeywordAnalyzer, PipelineConfig};
pub use cost::{estimate_cost, CostEstimate, CostRates};
pub use error::AnalyzeError;
pub use summary::{AnalysisSummary, Summarizer, SummaryOutcome};
pub use types::{AnalysisRequest, KeywordResult, Recommendation};
