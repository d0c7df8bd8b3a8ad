/// Application configuration, loaded from environment variables.
///
/// Carries the DataForSEO account identity plus every tuning knob the
/// acquisition pipeline needs: locale context for SERP requests, the task
/// polling schedule for asynchronous endpoints, and the inter-request
/// spacing for the forecast pass.
#[derive(Clone)]
pub struct AppConfig {
    pub dataforseo_login: String,
    pub dataforseo_password: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// DataForSEO location code sent with every SERP/keyword request.
    pub location_code: u32,
    /// DataForSEO language code sent with every SERP/keyword request.
    pub language_code: String,
    /// Seconds to wait after submitting an advertiser task before the first
    /// retrieval attempt.
    pub task_wait_secs: u64,
    /// Seconds between retrieval attempts while an advertiser task is still
    /// queued upstream.
    pub task_poll_interval_secs: u64,
    /// Retrieval attempts before an advertiser task is declared timed out.
    pub task_poll_max_attempts: u32,
    /// Milliseconds to sleep between forecast probes; the forecast endpoint
    /// has a stricter rate budget than the SERP endpoints.
    pub forecast_delay_ms: u64,
    /// Keywords in flight at once. The upstream rate budget assumes 1.
    pub keyword_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("dataforseo_login", &self.dataforseo_login)
            .field("dataforseo_password", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("location_code", &self.location_code)
            .field("language_code", &self.language_code)
            .field("task_wait_secs", &self.task_wait_secs)
            .field("task_poll_interval_secs", &self.task_poll_interval_secs)
            .field("task_poll_max_attempts", &self.task_poll_max_attempts)
            .field("forecast_delay_ms", &self.forecast_delay_ms)
            .field("keyword_concurrency", &self.keyword_concurrency)
            .finish()
    }
}
