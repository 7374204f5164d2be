//! The on-disk tracked-item record.
//!
//! The persisted file is a snapshot, not a live reference: the in-memory
//! store is authoritative during a run. Only the identifying fields and
//! the baseline survive a restart; `last_checked_at` resets to load time
//! and the notify channel comes from configuration.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::TrackedItem;

/// One tracked-item record as written to the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedItem {
    pub id: u64,
    pub name: String,
    /// Baseline price in major currency units.
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl PersistedItem {
    /// Captures the persistent fields of a live item.
    pub fn from_item(item: &TrackedItem) -> Self {
        Self {
            id: item.appid,
            name: item.name.clone(),
            price: item.baseline_price,
            region: item.region.clone(),
        }
    }

    /// Rebuilds a live item, wiring it to the configured alert channel.
    pub fn into_item(self, channel_id: u64) -> TrackedItem {
        TrackedItem {
            appid: self.id,
            name: self.name,
            baseline_price: self.price,
            region: self.region,
            last_checked_at: Utc::now(),
            channel_id,
        }
    }
}
