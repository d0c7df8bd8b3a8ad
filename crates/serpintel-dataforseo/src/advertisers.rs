//! Advertiser listings via the asynchronous task-post/task-get protocol.
//!
//! The `ads_advertisers` endpoint cannot answer synchronously: submission
//! returns a task id, and results become available only after upstream
//! processing. After an initial wait the task is polled on a fixed interval
//! until it is ready or the attempt cap is spent. The interval is flat on
//! purpose — the pipeline carries no generic retry/backoff policy.

use tokio::time::sleep;

use crate::client::{DataForSeoClient, ADS_TASK_GET_PATH, ADS_TASK_POST_PATH};
use crate::error::DataForSeoError;
use crate::normalize::domain_from_title;
use crate::types::{Advertiser, AdvertiserData, ResponseEnvelope, SerpItem, SerpResult};

/// Task-level status: the task has been handed to the processing queue.
const TASK_HANDED: u64 = 40601;
/// Task-level status: the task is waiting in the processing queue.
const TASK_IN_QUEUE: u64 = 40602;

impl DataForSeoClient {
    /// Fetches the paid-advertiser listing for one keyword.
    ///
    /// Submits a task, waits out the configured initial delay, then polls
    /// the retrieval endpoint until the task is ready. A ready task with no
    /// items is zero advertisers, not an error. The returned listing is
    /// truncated to the top 10; `total_count` keeps the untruncated count.
    ///
    /// # Errors
    ///
    /// - [`DataForSeoError::MissingTaskId`] if submission returned no task id.
    /// - [`DataForSeoError::TaskTimeout`] if the task never became ready.
    /// - [`DataForSeoError::Api`] / [`DataForSeoError::Http`] /
    ///   [`DataForSeoError::Deserialize`] as for any call.
    pub async fn advertisers(&self, keyword: &str) -> Result<AdvertiserData, DataForSeoError> {
        let task_id = self.submit_advertisers_task(keyword).await?;

        sleep(self.params().task_wait).await;

        let max_attempts = self.params().task_poll_max_attempts.max(1);
        let path = format!("{ADS_TASK_GET_PATH}/{task_id}");
        let mut attempt = 0u32;
        let items = loop {
            attempt += 1;
            let raw = self.get_json(&path).await?;
            let envelope: ResponseEnvelope<SerpResult> = serde_json::from_value(raw)
                .map_err(|e| DataForSeoError::Deserialize {
                    context: format!("advertisers task_get({task_id})"),
                    source: e,
                })?;

            match Self::task_items(envelope) {
                Some(items) => break items,
                None if attempt < max_attempts => {
                    tracing::debug!(
                        keyword,
                        task_id = %task_id,
                        attempt,
                        "advertiser task still queued"
                    );
                    sleep(self.params().task_poll_interval).await;
                }
                None => {
                    return Err(DataForSeoError::TaskTimeout {
                        keyword: keyword.to_owned(),
                        task_id,
                        attempts: attempt,
                    });
                }
            }
        };

        tracing::debug!(keyword, count = items.len(), "retrieved advertiser items");
        Ok(Self::classify_items(keyword, items))
    }

    /// Submits one advertiser task and returns its id.
    async fn submit_advertisers_task(&self, keyword: &str) -> Result<String, DataForSeoError> {
        let body = serde_json::json!([{
            "keyword": keyword,
            "location_code": self.params().location_code,
            "language_code": self.params().language_code,
        }]);

        let raw = self.post_json(ADS_TASK_POST_PATH, &body).await?;
        let envelope: ResponseEnvelope<SerpResult> =
            serde_json::from_value(raw).map_err(|e| DataForSeoError::Deserialize {
                context: format!("advertisers task_post({keyword})"),
                source: e,
            })?;

        envelope
            .tasks
            .first()
            .and_then(|t| t.id.clone())
            .ok_or_else(|| DataForSeoError::MissingTaskId {
                keyword: keyword.to_owned(),
            })
    }

    /// Extracts the item list from a retrieval response, or `None` while the
    /// task is still queued upstream.
    ///
    /// Readiness rule: a task reporting `40601`/`40602`, or one with no
    /// result array at all, is not ready yet. A ready task with a missing or
    /// empty item list yields an empty vec (zero advertisers).
    fn task_items(envelope: ResponseEnvelope<SerpResult>) -> Option<Vec<SerpItem>> {
        let task = envelope.tasks.into_iter().next()?;
        if matches!(task.status_code, Some(TASK_HANDED | TASK_IN_QUEUE)) {
            return None;
        }
        let result = task.result?;
        Some(
            result
                .into_iter()
                .next()
                .and_then(|r| r.items)
                .unwrap_or_default(),
        )
    }

    /// Normalizes the polymorphic item list into [`AdvertiserData`].
    fn classify_items(keyword: &str, items: Vec<SerpItem>) -> AdvertiserData {
        let mut advertisers: Vec<Advertiser> = Vec::new();
        for item in items {
            // Rank falls back to the item's 1-based position in the parsed list.
            #[allow(clippy::cast_possible_truncation)]
            let fallback_position = advertisers.len() as u32 + 1;
            match item {
                SerpItem::AdsAdvertiser {
                    title,
                    advertiser_id,
                    rank_absolute,
                    first_shown,
                } => {
                    advertisers.push(Advertiser {
                        domain: title
                            .as_deref()
                            .map_or_else(|| "unknown".to_owned(), domain_from_title),
                        position: rank_absolute.unwrap_or(fallback_position),
                        title: title.unwrap_or_else(|| "Unknown".to_owned()),
                        description: format!(
                            "Advertiser ID: {}",
                            advertiser_id.as_deref().unwrap_or("N/A")
                        ),
                        first_shown,
                    });
                }
                SerpItem::AdsDomain {
                    domain,
                    rank_absolute,
                } => {
                    let domain = domain.unwrap_or_else(|| "unknown".to_owned());
                    advertisers.push(Advertiser {
                        domain: domain.clone(),
                        position: rank_absolute.unwrap_or(fallback_position),
                        title: domain,
                        description: "Domain advertiser".to_owned(),
                        first_shown: None,
                    });
                }
                SerpItem::Organic { .. } | SerpItem::Other => {}
            }
        }

        let total_count = advertisers.len();
        advertisers.truncate(10);

        #[allow(clippy::cast_precision_loss)]
        let competition_level = (total_count as f64 / 10.0).min(1.0);

        AdvertiserData {
            keyword: keyword.to_owned(),
            advertisers,
            total_count,
            competition_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advertiser_item(title: &str, rank: Option<u32>) -> SerpItem {
        SerpItem::AdsAdvertiser {
            title: Some(title.to_owned()),
            advertiser_id: Some("AR1".to_owned()),
            rank_absolute: rank,
            first_shown: Some("2024-11-02".to_owned()),
        }
    }

    fn domain_item(domain: &str) -> SerpItem {
        SerpItem::AdsDomain {
            domain: Some(domain.to_owned()),
            rank_absolute: None,
        }
    }

    #[test]
    fn classify_normalizes_both_shapes() {
        let data = DataForSeoClient::classify_items(
            "scarpe running",
            vec![
                advertiser_item("AcmeCorp:IT", Some(1)),
                domain_item("runfast.it"),
            ],
        );
        assert_eq!(data.keyword, "scarpe running");
        assert_eq!(data.advertisers.len(), 2);
        assert_eq!(data.advertisers[0].domain, "acmecorp.com");
        assert_eq!(data.advertisers[0].description, "Advertiser ID: AR1");
        assert_eq!(data.advertisers[1].domain, "runfast.it");
        assert_eq!(data.advertisers[1].title, "runfast.it");
        // Second item has no source rank: falls back to list position.
        assert_eq!(data.advertisers[1].position, 2);
    }

    #[test]
    fn classify_ignores_unrecognized_shapes() {
        let data = DataForSeoClient::classify_items(
            "kw",
            vec![SerpItem::Other, domain_item("a.it"), SerpItem::Other],
        );
        assert_eq!(data.advertisers.len(), 1);
        assert_eq!(data.total_count, 1);
    }

    #[test]
    fn classify_truncates_to_ten_but_counts_all() {
        let items: Vec<SerpItem> = (0..15)
            .map(|i| domain_item(&format!("adv{i}.it")))
            .collect();
        let data = DataForSeoClient::classify_items("kw", items);
        assert_eq!(data.advertisers.len(), 10);
        assert_eq!(data.total_count, 15);
        assert!((data.competition_level - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn competition_level_saturates_at_one() {
        let three: Vec<SerpItem> = (0..3).map(|i| domain_item(&format!("a{i}.it"))).collect();
        let data = DataForSeoClient::classify_items("kw", three);
        assert!((data.competition_level - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_item_list_is_zero_advertisers() {
        let data = DataForSeoClient::classify_items("kw", Vec::new());
        assert!(data.advertisers.is_empty());
        assert_eq!(data.total_count, 0);
        assert!((data.competition_level).abs() < f64::EPSILON);
    }

    #[test]
    fn task_items_none_while_queued() {
        let envelope: ResponseEnvelope<SerpResult> =
            serde_json::from_value(serde_json::json!({
                "status_code": 20000,
                "tasks": [{ "id": "t1", "status_code": 40602 }]
            }))
            .expect("should parse");
        assert!(DataForSeoClient::task_items(envelope).is_none());
    }

    #[test]
    fn task_items_empty_result_is_zero_advertisers() {
        let envelope: ResponseEnvelope<SerpResult> =
            serde_json::from_value(serde_json::json!({
                "status_code": 20000,
                "tasks": [{ "id": "t1", "status_code": 20000, "result": [] }]
            }))
            .expect("should parse");
        let items = DataForSeoClient::task_items(envelope).expect("task is ready");
        assert!(items.is_empty());
    }
}
