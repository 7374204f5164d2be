//! Tracked-item store shared between the tracking flow and the watch loop.
//!
//! All access goes through the store's own operations, which serialize
//! concurrent callers behind a single mutex. [`TrackedItemStore::list`]
//! hands out cloned snapshots, never a live reference, so a watch-loop
//! iteration can never race a concurrent add or remove.
//!
//! When constructed with a path, the store rewrites the JSON mirror after
//! every successful mutation. A missing or malformed file at load time
//! starts the store empty; it is never fatal.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::models::item::TrackedItem;
use crate::models::persist::PersistedItem;
use crate::{Result, StorewatchError};

/// Ordered in-memory collection of tracked items, keyed by appid.
#[derive(Debug, Default)]
pub struct TrackedItemStore {
    items: Mutex<Vec<TrackedItem>>,
    path: Option<PathBuf>,
}

impl TrackedItemStore {
    /// Creates an empty in-memory store without persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store mirrored to `path` after every mutation.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            path: Some(path),
        }
    }

    /// Loads the store from `path`, wiring each loaded item to
    /// `default_channel` for alerts.
    ///
    /// A missing or malformed file logs a warning and yields an empty
    /// store; startup is never blocked on persisted state.
    pub fn load(path: PathBuf, default_channel: u64) -> Self {
        let items = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<PersistedItem>>(&raw) {
                Ok(records) => {
                    info!(path = %path.display(), items = records.len(), "loaded tracked items");
                    records
                        .into_iter()
                        .map(|record| record.into_item(default_channel))
                        .collect()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "tracked-item file is malformed, starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                info!(path = %path.display(), error = %e, "no tracked-item file, starting empty");
                Vec::new()
            }
        };

        Self {
            items: Mutex::new(items),
            path: Some(path),
        }
    }

    /// Adds an item to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Conflict`](StorewatchError::Conflict) when the appid is
    /// already tracked. Exactly one entry exists per appid; re-tracking
    /// requires an explicit [`remove`](Self::remove) first.
    pub fn add(&self, item: TrackedItem) -> Result<()> {
        let snapshot = {
            let mut items = self.items.lock().expect("store mutex poisoned");
            if items.iter().any(|existing| existing.appid == item.appid) {
                return Err(StorewatchError::Conflict { appid: item.appid });
            }
            items.push(item);
            items.clone()
        };
        self.mirror(&snapshot);
        Ok(())
    }

    /// Removes an item, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](StorewatchError::NotFound) when the appid is
    /// not tracked.
    pub fn remove(&self, appid: u64) -> Result<TrackedItem> {
        let (removed, snapshot) = {
            let mut items = self.items.lock().expect("store mutex poisoned");
            let index = items
                .iter()
                .position(|item| item.appid == appid)
                .ok_or(StorewatchError::NotFound { appid })?;
            let removed = items.remove(index);
            (removed, items.clone())
        };
        self.mirror(&snapshot);
        Ok(removed)
    }

    /// Returns a snapshot of the current contents.
    pub fn list(&self) -> Vec<TrackedItem> {
        self.items.lock().expect("store mutex poisoned").clone()
    }

    /// Commits a new baseline and check timestamp for `appid`.
    ///
    /// The baseline is monotonically non-increasing: a value above the
    /// stored baseline updates only the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](StorewatchError::NotFound) when the appid is
    /// not tracked (it may have been removed since the caller's snapshot).
    pub fn update_baseline(
        &self,
        appid: u64,
        new_price: Decimal,
        checked_at: DateTime<Utc>,
    ) -> Result<()> {
        let snapshot = {
            let mut items = self.items.lock().expect("store mutex poisoned");
            let item = items
                .iter_mut()
                .find(|item| item.appid == appid)
                .ok_or(StorewatchError::NotFound { appid })?;
            item.baseline_price = item.baseline_price.min(new_price);
            item.last_checked_at = checked_at;
            items.clone()
        };
        self.mirror(&snapshot);
        Ok(())
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.items.lock().expect("store mutex poisoned").len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrites the JSON mirror from a snapshot taken under the lock.
    ///
    /// File I/O happens outside the lock. A failure here does not undo the
    /// in-memory mutation — the in-memory copy is authoritative during a
    /// run — so callers log the error instead of propagating it.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](StorewatchError::Io) when the file cannot be written
    /// and [`Json`](StorewatchError::Json) when encoding fails.
    fn persist(&self, snapshot: &[TrackedItem]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let records: Vec<PersistedItem> = snapshot.iter().map(PersistedItem::from_item).collect();
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json)
            .map_err(|e| StorewatchError::Io(format!("write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Best-effort mirror rewrite after a successful mutation.
    fn mirror(&self, snapshot: &[TrackedItem]) {
        if let Err(e) = self.persist(snapshot) {
            warn!(error = %e, "failed to persist tracked items");
        }
    }
}
