//! The acquisition orchestrator.

use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serpintel_dataforseo::{
    AdvertiserData, DataForSeoClient, DataForSeoError, KeywordMetrics,
};
use tokio::time::sleep;

use crate::error::AnalyzeError;
use crate::types::{AnalysisRequest, KeywordResult, Recommendation};

/// Pipeline-level tuning: the concurrency policy across keywords and the
/// spacing of forecast probes. Both exist to stay inside the upstream rate
/// budget, not to go fast.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Keywords in flight at once. Within one keyword the advertiser and
    /// organic fetches always run concurrently, so the external request
    /// width is at most `2 * keyword_concurrency`.
    pub keyword_concurrency: usize,
    /// Sleep between forecast probes (not after the last one). The forecast
    /// endpoint enforces a stricter budget than the SERP endpoints.
    pub forecast_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keyword_concurrency: 1,
            forecast_delay: Duration::from_secs(1),
        }
    }
}

/// Raw outcome of the two concurrent sub-fetches for one keyword, before
/// the merge step turns it into a complete record.
struct KeywordFetch {
    keyword: String,
    advertisers: Result<AdvertiserData, DataForSeoError>,
    /// `None` when organic lookups were not requested.
    organic: Option<Result<Vec<u32>, DataForSeoError>>,
}

/// Drives the per-keyword fetchers over a keyword batch.
///
/// The contract the rest of the system relies on: the returned list has
/// exactly one entry per input keyword, in input order, and only a bulk
/// metrics failure (or an empty request) aborts the run.
pub struct KeywordAnalyzer {
    client: DataForSeoClient,
    config: PipelineConfig,
}

impl KeywordAnalyzer {
    #[must_use]
    pub fn new(client: DataForSeoClient, config: PipelineConfig) -> Self {
        Self { client, config }
    }

    /// Runs the full acquisition pipeline without progress reporting.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::NoKeywords`] for an empty keyword list.
    /// - [`AnalyzeError::MetricsFetch`] if the bulk metrics call fails.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Vec<KeywordResult>, AnalyzeError> {
        self.analyze_with_progress(request, |_, _| {}).await
    }

    /// Runs the full acquisition pipeline, invoking `on_progress` with the
    /// 1-based keyword index and the total after each keyword completes.
    ///
    /// # Errors
    ///
    /// - [`AnalyzeError::NoKeywords`] for an empty keyword list.
    /// - [`AnalyzeError::MetricsFetch`] if the bulk metrics call fails.
    pub async fn analyze_with_progress(
        &self,
        request: &AnalysisRequest,
        mut on_progress: impl FnMut(usize, usize),
    ) -> Result<Vec<KeywordResult>, AnalyzeError> {
        if request.keywords.is_empty() {
            return Err(AnalyzeError::NoKeywords);
        }

        let total = request.keywords.len();
        tracing::info!(
            total,
            target_domain = request.target_domain.as_deref().unwrap_or("none"),
            include_organic = request.include_organic,
            include_forecast = request.include_forecast,
            "starting keyword analysis"
        );

        let metrics = self
            .client
            .keyword_metrics(&request.keywords)
            .await
            .map_err(AnalyzeError::MetricsFetch)?;

        // Keywords move through a bounded stream: `keyword_concurrency` wide
        // across keywords (the rate-budget policy, default 1), two requests
        // wide inside each keyword. `buffered` keeps completion order equal
        // to input order.
        let width = self.config.keyword_concurrency.max(1);
        let mut fetches = stream::iter(request.keywords.iter())
            .map(|keyword| self.fetch_keyword(keyword, request))
            .buffered(width);

        let mut results: Vec<KeywordResult> = Vec::with_capacity(total);
        while let Some(fetch) = fetches.next().await {
            results.push(merge_record(fetch, &metrics));
            on_progress(results.len(), total);
        }

        if request.include_forecast {
            self.forecast_pass(&mut results).await;
        }

        tracing::info!(count = results.len(), "keyword analysis complete");
        Ok(results)
    }

    /// Runs the advertiser fetch and the (optional) organic fetch for one
    /// keyword concurrently and collects both outcomes. Never fails — the
    /// merge step decides what a failure means.
    async fn fetch_keyword(&self, keyword: &str, request: &AnalysisRequest) -> KeywordFetch {
        let advertisers = self.client.advertisers(keyword);
        let organic = async {
            if request.include_organic {
                Some(
                    self.client
                        .organic_positions(keyword, request.target_domain.as_deref())
                        .await,
                )
            } else {
                None
            }
        };

        let (advertisers, organic) = tokio::join!(advertisers, organic);
        KeywordFetch {
            keyword: keyword.to_owned(),
            advertisers,
            organic,
        }
    }

    /// Second pass over the built list: attach forecasts one keyword at a
    /// time with the configured spacing in between. Probe failures are
    /// logged and leave `forecast` as `None` — this pass never fails the
    /// run.
    async fn forecast_pass(&self, results: &mut [KeywordResult]) {
        let total = results.len();
        tracing::info!(total, "starting forecast pass");

        for (index, result) in results.iter_mut().enumerate() {
            match self.client.ad_traffic_forecast(&result.keyword).await {
                Ok(forecast) => result.forecast = forecast,
                Err(error) => {
                    tracing::warn!(
                        keyword = %result.keyword,
                        error = %error,
                        "ad traffic forecast unavailable"
                    );
                }
            }

            if index + 1 < total {
                sleep(self.config.forecast_delay).await;
            }
        }
    }
}

/// Combines the sub-fetch outcomes with the bulk metrics map into a
/// complete record.
///
/// Any sub-fetch failure degrades the keyword to defaults: empty advertiser
/// list, no organic positions. The metrics map is consulted either way, so
/// a degraded keyword still reports its bulk metrics when the API returned
/// them. Every record leaves here with the provisional `Test` tag.
fn merge_record(fetch: KeywordFetch, metrics: &HashMap<String, KeywordMetrics>) -> KeywordResult {
    let KeywordFetch {
        keyword,
        advertisers,
        organic,
    } = fetch;
    let metrics = metrics.get(&keyword).cloned().unwrap_or_default();

    let (advertiser_data, organic_positions) = match (advertisers, organic) {
        (Ok(data), Some(Ok(positions))) => (data, Some(positions)),
        (Ok(data), None) => (data, None),
        (Err(error), _) | (Ok(_), Some(Err(error))) => {
            tracing::warn!(
                keyword = %keyword,
                error = %error,
                "keyword fetch failed; emitting degraded record"
            );
            return KeywordResult {
                keyword,
                advertisers: Vec::new(),
                metrics,
                organic_positions: None,
                forecast: None,
                recommendation: Recommendation::Test,
            };
        }
    };

    KeywordResult {
        keyword,
        advertisers: advertiser_data.advertisers,
        metrics,
        organic_positions,
        forecast: None,
        recommendation: Recommendation::Test,
    }
}
