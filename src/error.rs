//! Crate-level error types.
//!
//! [`StorewatchError`] unifies every error source (configuration, the
//! storefront price source, the tracked-item store, the notification
//! sink) behind a single enum so callers can match on the variant they
//! care about while still using the `?` operator for easy propagation.
//!
//! Price absence is deliberately not represented here: a storefront that
//! has no price data for an item is a normal outcome and surfaces as
//! `Ok(None)` from [`PriceSource::quote`](crate::source::PriceSource::quote).

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StorewatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum StorewatchError {
    /// A configuration value is missing, malformed, or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any network call or state mutation
    /// (empty search query, tracking an item with no resolvable price).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The price source could not be reached or returned an unparseable
    /// response. Recoverable; the watch loop retries on the next tick.
    #[error("price source unavailable: {0}")]
    SourceUnavailable(String),

    /// The item is already tracked; re-tracking requires removing it first.
    #[error("item {appid} is already tracked")]
    Conflict { appid: u64 },

    /// A store operation referenced an item that is not tracked.
    #[error("item {appid} is not tracked")]
    NotFound { appid: u64 },

    /// The notification transport did not become ready within the
    /// caller-supplied timeout.
    #[error("notification sink not ready")]
    SinkNotReady,

    /// The notification target could not be resolved.
    #[error("notification channel {channel_id} not found")]
    SinkTargetNotFound { channel_id: u64 },

    /// The bot lacks permission to post to the notification target.
    #[error("not permitted to post to channel {channel_id}")]
    SinkForbidden { channel_id: u64 },

    /// The notification transport failed to deliver a message. The sink
    /// never retries; retry policy belongs to the caller.
    #[error("notification send failed: {0}")]
    SinkSendFailed(String),

    /// Reading or writing the persisted tracked-item file failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
