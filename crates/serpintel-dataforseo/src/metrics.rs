//! Bulk keyword-metrics endpoint.

use std::collections::HashMap;

use crate::client::{DataForSeoClient, SEARCH_VOLUME_PATH};
use crate::error::DataForSeoError;
use crate::types::{KeywordDataResult, KeywordMetrics, ResponseEnvelope};

impl DataForSeoClient {
    /// Fetches search volume, CPC, and competition for a whole keyword list
    /// in one call.
    ///
    /// Returns a map keyed by keyword. Keywords the API silently omits are
    /// absent from the map — callers substitute the zero default. Duplicate
    /// input keywords are wasted quota, not an error.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::Api`] if the API returns an error status.
    /// - [`DataForSeoError::Http`] on network failure.
    /// - [`DataForSeoError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn keyword_metrics(
        &self,
        keywords: &[String],
    ) -> Result<HashMap<String, KeywordMetrics>, DataForSeoError> {
        let body = serde_json::json!([{
            "keywords": keywords,
            "location_code": self.params().location_code,
            "language_code": self.params().language_code,
        }]);

        let raw = self.post_json(SEARCH_VOLUME_PATH, &body).await?;
        let envelope: ResponseEnvelope<KeywordDataResult> = serde_json::from_value(raw)
            .map_err(|e| DataForSeoError::Deserialize {
                context: format!("keyword_metrics({} keywords)", keywords.len()),
                source: e,
            })?;

        let mut metrics = HashMap::new();
        let items = envelope
            .first_result()
            .and_then(|r| r.items.as_deref())
            .unwrap_or_default();
        for item in items {
            metrics.insert(
                item.keyword.clone(),
                KeywordMetrics {
                    search_volume: item.search_volume.unwrap_or(0),
                    cpc: item.cpc.unwrap_or(0.0),
                    // Wire format is an integer percentage.
                    competition: item
                        .competition_index
                        .map_or(0.0, |index| (index / 100.0).clamp(0.0, 1.0)),
                },
            );
        }

        tracing::info!(count = metrics.len(), "retrieved keyword metrics");
        Ok(metrics)
    }
}
