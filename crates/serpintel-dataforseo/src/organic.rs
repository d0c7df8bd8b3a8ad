//! Organic SERP positions for a single keyword.

use crate::client::{DataForSeoClient, ORGANIC_LIVE_PATH};
use crate::error::DataForSeoError;
use crate::types::{ResponseEnvelope, SerpItem, SerpResult};

impl DataForSeoClient {
    /// Fetches the live organic SERP for one keyword and returns the
    /// 1-based positions of organic listings.
    ///
    /// Positions are indices into the *overall* interleaved result list —
    /// an organic listing sitting below two ad blocks is position 3, not 1.
    /// With `target_domain` set, only positions whose listing domain equals
    /// the target are kept; without it, every organic position is kept.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::Api`] if the API returns an error status.
    /// - [`DataForSeoError::Http`] on network failure.
    /// - [`DataForSeoError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn organic_positions(
        &self,
        keyword: &str,
        target_domain: Option<&str>,
    ) -> Result<Vec<u32>, DataForSeoError> {
        let body = serde_json::json!([{
            "keyword": keyword,
            "location_code": self.params().location_code,
            "language_code": self.params().language_code,
        }]);

        let raw = self.post_json(ORGANIC_LIVE_PATH, &body).await?;
        let envelope: ResponseEnvelope<SerpResult> = serde_json::from_value(raw)
            .map_err(|e| DataForSeoError::Deserialize {
                context: format!("organic_positions({keyword})"),
                source: e,
            })?;

        let items = envelope
            .first_result()
            .and_then(|r| r.items.as_deref())
            .unwrap_or_default();

        let mut positions = Vec::new();
        for (item, position) in items.iter().zip(1u32..) {
            if let SerpItem::Organic { domain } = item {
                let wanted = target_domain.is_none_or(|t| domain.as_deref() == Some(t));
                if wanted {
                    positions.push(position);
                }
            }
        }

        tracing::debug!(keyword, count = positions.len(), "found organic positions");
        Ok(positions)
    }
}
