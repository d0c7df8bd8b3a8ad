//! Contract for the downstream summarization step.
//!
//! Final classification of each keyword — and the narrative around it — is
//! delegated to an external component (an LLM-backed analyzer in the
//! production deployment). This crate only defines the boundary: ownership
//! of the ordered result list passes to the summarizer, which returns it
//! with final recommendations stamped in, plus the aggregate summary.

use std::collections::HashMap;
use std::future::Future;

use serde::Serialize;

use crate::types::{KeywordResult, Recommendation};

/// Aggregate view over a summarized batch.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    /// How many keywords landed in each recommendation category.
    pub recommendation_counts: HashMap<Recommendation, usize>,
    /// Narrative observations about the batch as a whole.
    pub insights: Vec<String>,
    /// Keywords the summarizer considers worth acting on first.
    pub priority_keywords: Vec<String>,
}

/// Everything the summarizer hands back.
#[derive(Debug)]
pub struct SummaryOutcome {
    /// The same records, same order, with final recommendations assigned.
    pub results: Vec<KeywordResult>,
    pub summary: AnalysisSummary,
}

/// The downstream summarizer.
///
/// Receives the enriched records together with the caller's brand domains
/// (used to tell own-brand keywords from competitor ones) and produces the
/// final per-keyword recommendations and the batch summary.
pub trait Summarizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn summarize(
        &self,
        results: Vec<KeywordResult>,
        brand_domains: &[String],
    ) -> impl Future<Output = Result<SummaryOutcome, Self::Error>> + Send;
}
