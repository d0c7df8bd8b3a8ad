use thiserror::Error;

/// Errors returned by the DataForSEO API client.
#[derive(Debug, Error)]
pub enum DataForSeoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The HTTP status was non-2xx, or the envelope carried a `status_code`
    /// other than `20000`.
    #[error("DataForSEO API error {code}: {message}")]
    Api { code: u64, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Task submission succeeded at the transport level but no task id came
    /// back, so the results can never be retrieved.
    #[error("no task id returned for keyword \"{keyword}\"")]
    MissingTaskId { keyword: String },

    /// The advertiser task was still queued upstream after every retrieval
    /// attempt was spent.
    #[error("advertiser task {task_id} for \"{keyword}\" not ready after {attempts} attempts")]
    TaskTimeout {
        keyword: String,
        task_id: String,
        attempts: u32,
    },
}
