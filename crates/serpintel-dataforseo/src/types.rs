//! DataForSEO API response types and the domain types derived from them.
//!
//! ## Observed wire shape
//!
//! Every v3 response is wrapped in the same envelope:
//! `{ "status_code": 20000, "status_message": "Ok.", "tasks": [ ... ] }`.
//! `20000` means success; anything else is an application-level error even
//! when the HTTP status is 200. Each task entry carries its own
//! `status_code` — an asynchronous task that is still queued reports
//! `40601` ("Task Handed") or `40602` ("Task In Queue") with no `result`.
//!
//! SERP result items are polymorphic on the `"type"` field. Only three
//! shapes matter here (`ads_advertiser`, `ads_domain`, `organic`); the
//! many others (`people_also_ask`, `paid`, shopping blocks, ...) are
//! deliberately collapsed into [`SerpItem::Other`] and skipped.
//!
//! `ads_advertiser` items never expose a literal domain — only a display
//! title like `"AcmeCorp:IT"` — so the domain is reconstructed
//! heuristically (see `normalize.rs`). `ads_domain` items carry the real
//! domain.

use serde::{Deserialize, Serialize};

/// DataForSEO account credentials used for HTTP Basic authentication.
///
/// The secret is write-only: `Debug` redacts it, and the transport layer
/// logs only the login.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Search-volume metrics for one keyword from the bulk lookup.
///
/// `competition` is normalized from the API's integer percentage into
/// `[0, 1]`. The zero value (via `Default`) stands in for keywords the API
/// omitted from its response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetrics {
    pub search_volume: u64,
    pub cpc: f64,
    pub competition: f64,
}

/// One paid advertiser shown for a keyword, normalized from either wire
/// shape (`ads_advertiser` or `ads_domain`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertiser {
    pub domain: String,
    /// 1-based rank in the advertiser listing.
    pub position: u32,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_shown: Option<String>,
}

/// Advertiser listing for one keyword.
///
/// `advertisers` is truncated to the top 10 for display; `total_count`
/// preserves the untruncated count. `competition_level` is the saturating
/// normalization `min(total_count / 10, 1.0)` — an advertiser-density
/// proxy, not a probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertiserData {
    pub keyword: String,
    pub advertisers: Vec<Advertiser>,
    pub total_count: usize,
    pub competition_level: f64,
}

/// Simulated traffic for exact-match, maximum-bid advertising on a keyword.
///
/// Absent entirely (`Option<Forecast>` is `None`) when the API has no
/// inventory data for the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub impressions: f64,
    pub clicks: f64,
    pub ctr: f64,
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// Top-level envelope for all DataForSEO v3 responses.
///
/// The envelope-level `status_code`/`status_message` pair is checked by the
/// transport layer on the raw JSON before typed deserialization, so only
/// the task list is modeled here.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub tasks: Vec<TaskEntry<T>>,
}

/// One task entry inside the envelope. Synchronous ("live") endpoints
/// return exactly one, already populated; asynchronous endpoints return the
/// submission receipt first and the populated entry from `task_get` later.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct TaskEntry<T> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status_code: Option<u64>,
    #[serde(default)]
    pub result: Option<Vec<T>>,
}

impl<T> ResponseEnvelope<T> {
    /// The first result object of the first task, the common payload
    /// position for single-task calls. `None` covers every level of
    /// absence — no tasks, no result array, empty result array.
    pub fn first_result(&self) -> Option<&T> {
        self.tasks.first().and_then(|t| t.result.as_deref()?.first())
    }
}

/// Result object for keyword-data endpoints: a batch of per-keyword items.
#[derive(Debug, Deserialize)]
pub(crate) struct KeywordDataResult {
    #[serde(default)]
    pub items: Option<Vec<MetricsItem>>,
}

/// Per-keyword metrics as returned on the wire. `competition_index` is an
/// integer percentage (0–100).
#[derive(Debug, Deserialize)]
pub(crate) struct MetricsItem {
    pub keyword: String,
    #[serde(default)]
    pub search_volume: Option<u64>,
    #[serde(default)]
    pub cpc: Option<f64>,
    #[serde(default)]
    pub competition_index: Option<f64>,
}

/// Result object for SERP endpoints: an ordered, interleaved item list.
#[derive(Debug, Deserialize)]
pub(crate) struct SerpResult {
    #[serde(default)]
    pub items: Option<Vec<SerpItem>>,
}

/// A SERP result item, discriminated on the wire `"type"` tag at parse
/// time. Unrecognized shapes land in `Other` and are ignored downstream.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum SerpItem {
    #[serde(rename = "ads_advertiser")]
    AdsAdvertiser {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        advertiser_id: Option<String>,
        #[serde(default)]
        rank_absolute: Option<u32>,
        #[serde(default)]
        first_shown: Option<String>,
    },
    #[serde(rename = "ads_domain")]
    AdsDomain {
        #[serde(default)]
        domain: Option<String>,
        #[serde(default)]
        rank_absolute: Option<u32>,
    },
    #[serde(rename = "organic")]
    Organic {
        #[serde(default)]
        domain: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Result object for the ad-traffic forecast endpoint. All figures may be
/// absent when the API has no inventory data for the simulated bid.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResult {
    #[serde(default)]
    pub impressions: Option<f64>,
    #[serde(default)]
    pub clicks: Option<f64>,
    #[serde(default)]
    pub ctr: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_secret() {
        let creds = Credentials::new("login@example.com", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("login@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn serp_item_parses_advertiser_shape() {
        let raw = serde_json::json!({
            "type": "ads_advertiser",
            "title": "AcmeCorp:IT",
            "advertiser_id": "AR123",
            "rank_absolute": 2,
            "first_shown": "2024-11-02"
        });
        let item: SerpItem = serde_json::from_value(raw).expect("should parse");
        match item {
            SerpItem::AdsAdvertiser {
                title,
                advertiser_id,
                rank_absolute,
                first_shown,
            } => {
                assert_eq!(title.as_deref(), Some("AcmeCorp:IT"));
                assert_eq!(advertiser_id.as_deref(), Some("AR123"));
                assert_eq!(rank_absolute, Some(2));
                assert_eq!(first_shown.as_deref(), Some("2024-11-02"));
            }
            other => panic!("expected AdsAdvertiser, got {other:?}"),
        }
    }

    #[test]
    fn serp_item_parses_domain_shape() {
        let raw = serde_json::json!({
            "type": "ads_domain",
            "domain": "acme.it",
            "rank_absolute": 1
        });
        let item: SerpItem = serde_json::from_value(raw).expect("should parse");
        assert!(matches!(item, SerpItem::AdsDomain { .. }));
    }

    #[test]
    fn unknown_serp_item_collapses_to_other() {
        let raw = serde_json::json!({
            "type": "people_also_ask",
            "items": []
        });
        let item: SerpItem = serde_json::from_value(raw).expect("should parse");
        assert!(matches!(item, SerpItem::Other));
    }

    #[test]
    fn first_result_is_none_for_empty_tasks() {
        let envelope: ResponseEnvelope<SerpResult> = serde_json::from_value(serde_json::json!({
            "status_code": 20000,
            "tasks": []
        }))
        .expect("should parse");
        assert!(envelope.first_result().is_none());
    }
}
