//! Transport layer: authenticated request execution and envelope checking.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::DataForSeoError;
use crate::types::Credentials;

const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com";

/// Application-level success code carried in every response envelope.
pub(crate) const STATUS_OK: u64 = 20000;

pub(crate) const SEARCH_VOLUME_PATH: &str = "/v3/keywords_data/google_ads/search_volume/live";
pub(crate) const ADS_TASK_POST_PATH: &str = "/v3/serp/google/ads_advertisers/task_post";
pub(crate) const ADS_TASK_GET_PATH: &str = "/v3/serp/google/ads_advertisers/task_get/advanced";
pub(crate) const ORGANIC_LIVE_PATH: &str = "/v3/serp/google/organic/live/advanced";
pub(crate) const AD_TRAFFIC_PATH: &str = "/v3/keywords_data/google_ads/ad_traffic_by_keywords/live";

/// Request context shared by every fetch: locale targeting plus the polling
/// schedule for asynchronous task endpoints.
///
/// Defaults match the production configuration (Italian market, 5 s initial
/// task wait). Tests zero the durations to keep the suite fast.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub location_code: u32,
    pub language_code: String,
    /// Wait after task submission before the first retrieval attempt.
    pub task_wait: Duration,
    /// Spacing between retrieval attempts while the task is still queued.
    pub task_poll_interval: Duration,
    /// Retrieval attempts before giving up on a task.
    pub task_poll_max_attempts: u32,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            location_code: 2380,
            language_code: "it".to_owned(),
            task_wait: Duration::from_secs(5),
            task_poll_interval: Duration::from_secs(5),
            task_poll_max_attempts: 6,
        }
    }
}

/// Client for the DataForSEO v3 REST API.
///
/// Holds the HTTP client, account credentials, base URL, and fetch
/// parameters. Use [`DataForSeoClient::new`] for production or
/// [`DataForSeoClient::with_base_url`] to point at a mock server in tests.
///
/// The transport never retries: one call, one outcome. Rate-limit coping is
/// the orchestrator's job, by serializing keywords and spacing forecast
/// probes.
pub struct DataForSeoClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
    params: FetchParams,
}

impl DataForSeoClient {
    /// Creates a new client pointed at the production DataForSEO API.
    ///
    /// # Errors
    ///
    /// Returns [`DataForSeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        credentials: Credentials,
        params: FetchParams,
        timeout_secs: u64,
    ) -> Result<Self, DataForSeoError> {
        Self::with_base_url(credentials, params, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DataForSeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        credentials: Credentials,
        params: FetchParams,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, DataForSeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("serpintel/0.1 (keyword-intelligence)")
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_owned(),
            params,
        })
    }

    pub(crate) fn params(&self) -> &FetchParams {
        &self.params
    }

    /// Sends a POST with a JSON body, checks the envelope, and returns the
    /// raw JSON for typed deserialization at the call site.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::Http`] on network failure.
    /// - [`DataForSeoError::Api`] on a non-2xx status or a non-`20000`
    ///   envelope `status_code`.
    /// - [`DataForSeoError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<Value, DataForSeoError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(path, login = %self.credentials.login, "calling DataForSEO");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.login, Some(&self.credentials.secret))
            .json(body)
            .send()
            .await?;

        Self::unwrap_envelope(path, response).await
    }

    /// Sends a GET, checks the envelope, and returns the raw JSON.
    ///
    /// # Errors
    ///
    /// Same as [`Self::post_json`].
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, DataForSeoError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(path, login = %self.credentials.login, "calling DataForSEO (GET)");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.login, Some(&self.credentials.secret))
            .send()
            .await?;

        Self::unwrap_envelope(path, response).await
    }

    /// Parses the response body as JSON and applies the uniform failure
    /// rule: the call failed if the HTTP status is non-2xx OR the envelope
    /// carries a `status_code` other than `20000`.
    async fn unwrap_envelope(
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value, DataForSeoError> {
        let http_status = response.status();
        let text = response.text().await?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| DataForSeoError::Deserialize {
                context: path.to_owned(),
                source: e,
            })?;

        let app_code = body.get("status_code").and_then(Value::as_u64);
        let app_failed = app_code.is_some_and(|c| c != STATUS_OK);
        if !http_status.is_success() || app_failed {
            let message = body
                .get("status_message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_owned();
            let code = app_code.unwrap_or_else(|| u64::from(http_status.as_u16()));
            tracing::error!(path, code, %message, "DataForSEO API error");
            return Err(DataForSeoError::Api { code, message });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DataForSeoClient {
        DataForSeoClient::with_base_url(
            Credentials::new("login@example.com", "secret"),
            FetchParams::default(),
            30,
            base_url,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = test_client("https://api.dataforseo.com/");
        assert_eq!(client.base_url, "https://api.dataforseo.com");
    }

    #[test]
    fn default_params_match_production_locale() {
        let params = FetchParams::default();
        assert_eq!(params.location_code, 2380);
        assert_eq!(params.language_code, "it");
        assert_eq!(params.task_wait, Duration::from_secs(5));
    }
}
