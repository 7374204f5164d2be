//! The tracked-item domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One item under price surveillance.
///
/// `baseline_price` is the lowest price observed since tracking began and
/// is only ever lowered, never raised: the watch loop commits a new
/// baseline exclusively after a strictly lower price has been observed
/// and its alert delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItem {
    /// Storefront-assigned identifier, immutable.
    pub appid: u64,
    /// Display label, immutable after creation.
    pub name: String,
    /// Comparison point for drop detection, in major currency units.
    pub baseline_price: Decimal,
    /// Country code used for every price query for this item.
    pub region: Option<String>,
    /// When the most recent successful price comparison committed.
    pub last_checked_at: DateTime<Utc>,
    /// Channel that receives drop alerts for this item.
    pub channel_id: u64,
}

impl TrackedItem {
    /// Creates a tracked item with `last_checked_at` set to now.
    ///
    /// Callers must have resolved a concrete price first; an item with no
    /// price data cannot be tracked (see [`crate::track::track_item`]).
    pub fn new(
        appid: u64,
        name: impl Into<String>,
        baseline_price: Decimal,
        region: Option<String>,
        channel_id: u64,
    ) -> Self {
        Self {
            appid,
            name: name.into(),
            baseline_price,
            region,
            last_checked_at: Utc::now(),
            channel_id,
        }
    }
}
