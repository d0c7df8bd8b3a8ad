//! Client for the DataForSEO v3 REST API.
//!
//! Wraps `reqwest` with DataForSEO-specific error handling, HTTP Basic
//! authentication, and typed response deserialization. Every endpoint checks
//! the `status_code` field in the JSON envelope and surfaces API-level
//! failures as [`DataForSeoError::Api`].
//!
//! Four data fetches are exposed on [`DataForSeoClient`]:
//! - [`keyword_metrics`](DataForSeoClient::keyword_metrics) — one bulk
//!   search-volume/CPC/competition lookup for a whole keyword list;
//! - [`advertisers`](DataForSeoClient::advertisers) — paid-advertiser
//!   listings via the asynchronous task-post/task-get protocol;
//! - [`organic_positions`](DataForSeoClient::organic_positions) — organic
//!   SERP ranks, optionally filtered to a target domain;
//! - [`ad_traffic_forecast`](DataForSeoClient::ad_traffic_forecast) —
//!   exact-match, maximum-bid traffic simulation.

mod advertisers;
mod client;
mod error;
mod forecast;
mod metrics;
mod normalize;
mod organic;
mod types;

pub use client::{DataForSeoClient, FetchParams};
pub use error::DataForSeoError;
pub use types::{Advertiser, AdvertiserData, Credentials, Forecast, KeywordMetrics};
