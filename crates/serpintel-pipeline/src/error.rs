use serpintel_dataforseo::DataForSeoError;
use thiserror::Error;

/// Errors that abort a whole analysis run.
///
/// Per-keyword fetch failures never appear here — they degrade the affected
/// record and the run continues.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The request carried no keywords. Caught before any network call.
    #[error("no keywords supplied")]
    NoKeywords,

    /// The bulk metrics call failed. Without the metrics map there is no
    /// basis for any record, so the run stops here.
    #[error("bulk metrics fetch failed: {0}")]
    MetricsFetch(#[source] DataForSeoError),
}
