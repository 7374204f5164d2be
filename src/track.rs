//! Tracking flow: resolve a price and place an item under surveillance.

use std::time::Duration;

use tracing::{info, warn};

use crate::models::item::TrackedItem;
use crate::models::search::SearchHit;
use crate::notify::Notifier;
use crate::source::PriceSource;
use crate::store::TrackedItemStore;
use crate::{Result, StorewatchError};

/// How long the tracking-started notice waits for the sink handshake.
const TRACK_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Starts tracking a search match at its current price.
///
/// The quoted price becomes the baseline. The tracking-started notice is
/// best-effort: a sink failure is logged but does not untrack the item.
///
/// # Errors
///
/// - [`InvalidInput`](StorewatchError::InvalidInput) when the storefront
///   has no price data for the item in `region` — an unpriceable item
///   cannot be tracked, and no state is mutated.
/// - [`Conflict`](StorewatchError::Conflict) when the appid is already
///   tracked.
/// - [`SourceUnavailable`](StorewatchError::SourceUnavailable) when the
///   price lookup itself fails.
pub async fn track_item<S: PriceSource>(
    source: &S,
    store: &TrackedItemStore,
    notifier: &Notifier,
    hit: &SearchHit,
    region: &str,
    channel_id: u64,
) -> Result<TrackedItem> {
    let Some(price) = source.quote(hit.id, region).await? else {
        return Err(StorewatchError::InvalidInput(format!(
            "{} (id {}) has no price data in region {region}",
            hit.name, hit.id
        )));
    };

    let item = TrackedItem::new(
        hit.id,
        hit.name.clone(),
        price,
        Some(region.to_string()),
        channel_id,
    );
    store.add(item.clone())?;
    info!(
        appid = item.appid,
        name = %item.name,
        baseline = %item.baseline_price,
        "tracking started"
    );

    let notice = format!(
        "Tracking started: **{}** (ID: {}) Price: ${:.2}",
        item.name, item.appid, item.baseline_price
    );
    if let Err(e) = notifier
        .send(channel_id, notice, TRACK_READY_TIMEOUT)
        .await
    {
        warn!(appid = item.appid, error = %e, "tracking-started notice failed");
    }

    Ok(item)
}
