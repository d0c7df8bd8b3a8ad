//! Ad-traffic forecast for a single keyword.

use crate::client::{DataForSeoClient, AD_TRAFFIC_PATH};
use crate::error::DataForSeoError;
use crate::types::{Forecast, ForecastResult, ResponseEnvelope};

/// Bid used for the simulation: high enough that the projection reflects
/// maximum attainable traffic rather than a budget-limited slice.
const MAX_BID: u32 = 999;

impl DataForSeoClient {
    /// Requests an exact-match, maximum-bid traffic simulation for one
    /// keyword.
    ///
    /// Returns `Ok(None)` when the response carries no usable impressions
    /// figure — the API reports nothing useful for keywords without ad
    /// inventory. Transport and API failures propagate; the caller decides
    /// whether a missing forecast is fatal (the pipeline treats it as
    /// "no forecast").
    ///
    /// This endpoint has a stricter rate budget than the SERP endpoints, so
    /// the orchestrator spaces calls out rather than interleaving them with
    /// the per-keyword fetches.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::Api`] if the API returns an error status.
    /// - [`DataForSeoError::Http`] on network failure.
    /// - [`DataForSeoError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn ad_traffic_forecast(
        &self,
        keyword: &str,
    ) -> Result<Option<Forecast>, DataForSeoError> {
        let body = serde_json::json!([{
            "keywords": [keyword],
            "location_code": self.params().location_code,
            "language_code": self.params().language_code,
            "bid": MAX_BID,
            "match": "exact",
        }]);

        let raw = self.post_json(AD_TRAFFIC_PATH, &body).await?;
        let envelope: ResponseEnvelope<ForecastResult> = serde_json::from_value(raw)
            .map_err(|e| DataForSeoError::Deserialize {
                context: format!("ad_traffic_forecast({keyword})"),
                source: e,
            })?;

        let forecast = envelope.first_result().and_then(|f| {
            let impressions = f.impressions?;
            // Zero impressions means the simulation found no inventory.
            (impressions > 0.0).then(|| Forecast {
                impressions,
                clicks: f.clicks.unwrap_or(0.0),
                ctr: f.ctr.unwrap_or(0.0),
                cost: f.cost.unwrap_or(0.0),
            })
        });

        if forecast.is_none() {
            tracing::debug!(keyword, "no ad traffic inventory for keyword");
        }
        Ok(forecast)
    }
}
