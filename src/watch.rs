//! Background price watch loop.
//!
//! One watcher task re-checks every tracked item on a fixed interval.
//! Each tick works on a snapshot of the store, so items added or removed
//! mid-sleep are picked up on the next tick, and items are processed
//! independently: one item's transient source failure never aborts the
//! tick or affects the others.
//!
//! Baselines move notify-then-commit: the new baseline is written only
//! after the drop alert has been delivered. A failed send leaves the
//! baseline untouched, so the same drop is re-detected and re-notified
//! on the next tick instead of being silently lost.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::Result;
use crate::models::item::TrackedItem;
use crate::notify::Notifier;
use crate::source::PriceSource;
use crate::store::TrackedItemStore;

/// How long a drop alert waits for the sink handshake before giving up.
const SEND_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Periodic price checker driving the notification sink.
pub struct PriceWatcher<S: PriceSource> {
    source: S,
    store: Arc<TrackedItemStore>,
    notifier: Notifier,
    interval: Duration,
    default_region: String,
    shutdown: watch::Receiver<bool>,
}

impl<S: PriceSource> PriceWatcher<S> {
    /// Creates a watcher over the shared store.
    ///
    /// `shutdown` is the cancellation flag: the loop observes it between
    /// items and during the inter-tick sleep and exits cleanly at the
    /// next such point.
    pub fn new(
        source: S,
        store: Arc<TrackedItemStore>,
        notifier: Notifier,
        interval: Duration,
        default_region: impl Into<String>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
            interval,
            default_region: default_region.into(),
            shutdown,
        }
    }

    /// Runs ticks until cancellation.
    ///
    /// The inter-tick sleep is raced against the shutdown flag, so
    /// shutdown latency is bounded by the in-flight item check, not by
    /// the interval.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "price watcher started"
        );
        loop {
            if self.shutdown_requested() {
                break;
            }
            self.tick().await;
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.changed() => break,
            }
        }
        info!("price watcher stopped");
    }

    /// Runs one pass over a fresh snapshot of the store.
    pub async fn tick(&self) {
        let snapshot = self.store.list();
        debug!(items = snapshot.len(), "tick started");
        for item in &snapshot {
            if self.shutdown_requested() {
                return;
            }
            // Per-item isolation: a failure here is logged and the tick
            // moves on to the next item.
            if let Err(e) = self.check_item(item).await {
                warn!(appid = item.appid, name = %item.name, error = %e, "price check failed");
            }
        }
    }

    fn shutdown_requested(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Re-quotes one item and, on a strict drop, alerts then commits.
    async fn check_item(&self, item: &TrackedItem) -> Result<()> {
        let region = item.region.as_deref().unwrap_or(&self.default_region);
        let Some(current) = self.source.quote(item.appid, region).await? else {
            // No price data in this region: a valid outcome, no mutation.
            debug!(appid = item.appid, region, "no price data, skipping");
            return Ok(());
        };

        if current >= item.baseline_price {
            return Ok(());
        }

        let message = drop_alert(&item.name, item.baseline_price, current);
        self.notifier
            .send(item.channel_id, message, SEND_READY_TIMEOUT)
            .await?;

        // Commit only after the alert is out; a send failure above has
        // already returned and the drop stays eligible for the next tick.
        self.store
            .update_baseline(item.appid, current, Utc::now())?;
        info!(
            appid = item.appid,
            name = %item.name,
            old_price = %item.baseline_price,
            new_price = %current,
            "price drop recorded"
        );
        Ok(())
    }
}

/// Formats a drop alert with the item name, both prices, and the
/// discount percentage rounded to two decimals.
pub fn drop_alert(name: &str, old_price: Decimal, new_price: Decimal) -> String {
    let discount = old_price - new_price;
    let discount_percent = (discount / old_price * Decimal::ONE_HUNDRED).round_dp(2);
    format!(
        "🎮 **{name}** is on sale!\n💰 Original price: ${old_price:.2}\n🛒 Current price: ${new_price:.2}\n🎉 Discount: {discount_percent}%"
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn drop_alert_reports_discount_percent() {
        let message = drop_alert("Half-Life 3", dec!(19.99), dec!(14.99));
        assert!(message.contains("Half-Life 3"));
        assert!(message.contains("$19.99"));
        assert!(message.contains("$14.99"));
        assert!(message.contains("25.01%"));
    }

    #[test]
    fn drop_alert_handles_round_percentages() {
        let message = drop_alert("Portal", dec!(20.00), dec!(15.00));
        assert!(message.contains("25.00%") || message.contains("25%"));
    }
}
