//! Wire models for the storefront `appdetails` price lookup.
//!
//! The storefront reports prices in integer minor units (cents). The
//! conversion to a major-unit [`Decimal`] happens exactly once, here at
//! the wire boundary, with `Decimal::new(cents, 2)` — exact fixed point,
//! so the watch loop's baseline comparisons never see binary-float
//! drift. Raw cents do not leak past this module.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response body of the `appdetails` endpoint: a map keyed by the
/// requested appid rendered as a string.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct AppDetailsResponse(pub HashMap<String, AppDetailsEntry>);

/// Per-appid envelope. `success: false` (or a missing `price_overview`)
/// means the storefront has no price data for this item in the queried
/// region — a valid no-data outcome, not an error.
#[derive(Debug, Deserialize)]
pub struct AppDetailsEntry {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppData>,
}

/// The `data` payload, filtered down to the price overview.
#[derive(Debug, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
}

/// Current pricing for one item, as reported by the storefront.
#[derive(Debug, Deserialize)]
pub struct PriceOverview {
    /// Current price in integer minor units (cents).
    #[serde(rename = "final")]
    pub final_cents: i64,
    /// Pre-discount price in minor units, when the storefront reports one.
    #[serde(default)]
    pub initial: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<u32>,
}

impl PriceOverview {
    /// Current price in major currency units.
    pub fn final_price(&self) -> Decimal {
        Decimal::new(self.final_cents, 2)
    }
}

impl AppDetailsResponse {
    /// Extracts the current price for `appid`, or `None` when the
    /// storefront has no price data for it.
    pub fn price_for(&self, appid: u64) -> Option<Decimal> {
        self.0
            .get(&appid.to_string())
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data.as_ref())
            .and_then(|data| data.price_overview.as_ref())
            .map(PriceOverview::final_price)
    }
}
