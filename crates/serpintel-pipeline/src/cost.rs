//! Pre-acquisition cost projection.
//!
//! The estimate is computed from request shape alone, before any network
//! activity, and is independent of how much of the acquisition later
//! succeeds — a budgeting projection, not a metered actual.

use rust_decimal::Decimal;
use serde::Serialize;

/// Per-unit API prices and the currency conversion rate, in USD.
///
/// Defaults mirror the DataForSEO price list the tool was budgeted
/// against: the bulk metrics call and the forecast probe are flat fees per
/// run; advertiser and organic lookups are billed per keyword.
#[derive(Debug, Clone)]
pub struct CostRates {
    pub metrics_batch_fee: Decimal,
    pub forecast_probe_fee: Decimal,
    pub advertiser_fee_per_keyword: Decimal,
    pub organic_fee_per_keyword: Decimal,
    pub usd_to_eur: Decimal,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            metrics_batch_fee: Decimal::new(75, 3),        // 0.075
            forecast_probe_fee: Decimal::new(75, 3),       // 0.075
            advertiser_fee_per_keyword: Decimal::new(2, 3), // 0.002
            organic_fee_per_keyword: Decimal::new(15, 4),  // 0.0015
            usd_to_eur: Decimal::new(93, 2),               // 0.93
        }
    }
}

/// Projected cost of one analysis run, in both billing currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostEstimate {
    pub total_usd: Decimal,
    pub total_eur: Decimal,
}

/// Projects the API cost of analyzing `keyword_count` keywords with the
/// given options.
#[must_use]
pub fn estimate_cost(
    rates: &CostRates,
    keyword_count: usize,
    include_organic: bool,
    include_forecast: bool,
) -> CostEstimate {
    let count = Decimal::from(keyword_count);

    let mut total_usd = rates.metrics_batch_fee + count * rates.advertiser_fee_per_keyword;
    if include_organic {
        total_usd += count * rates.organic_fee_per_keyword;
    }
    if include_forecast {
        total_usd += rates.forecast_probe_fee;
    }

    CostEstimate {
        total_usd,
        total_eur: total_usd * rates.usd_to_eur,
    }
}
