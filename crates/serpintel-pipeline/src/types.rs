//! Request and result types for the analysis pipeline.

use serde::{Deserialize, Serialize};
use serpintel_dataforseo::{Advertiser, Forecast, KeywordMetrics};

/// One analysis run: the keyword batch plus the options the caller chose.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub keywords: Vec<String>,
    /// Brand domain used to filter organic positions to the caller's own
    /// listings. `None` records every organic position.
    pub target_domain: Option<String>,
    pub include_organic: bool,
    pub include_forecast: bool,
}

impl AnalysisRequest {
    /// Request with the default options: organic positions on, forecast off
    /// (the forecast endpoint is slow and has its own rate budget).
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            target_domain: None,
            include_organic: true,
            include_forecast: false,
        }
    }
}

/// Classification tag for a keyword. The pipeline stamps the provisional
/// `Test` tag on every record; the downstream summarizer assigns the final
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    NoPaid,
    YesPaid,
    Test,
    Opportunity,
}

/// The fully-enriched record for one input keyword.
///
/// Exactly one of these exists per input keyword, in input order. A keyword
/// whose SERP fetches all failed still gets a record — empty advertisers,
/// whatever the bulk metrics map held, no organic positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub advertisers: Vec<Advertiser>,
    pub metrics: KeywordMetrics,
    /// `None` when organic lookups were disabled or failed for this keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organic_positions: Option<Vec<u32>>,
    /// Attached by the forecast pass; stays `None` when forecasting is off,
    /// the probe failed, or the API had no inventory data.
    pub forecast: Option<Forecast>,
    pub recommendation: Recommendation,
}
