//! Storefront price-drop tracker library.
//!
//! Provides a typed client for the Steam storefront API (search and
//! price lookup), a mutex-serialized tracked-item store with optional
//! JSON persistence, a queue-backed Discord notification sink, and a
//! background watch loop that alerts a channel whenever a tracked
//! item's price falls below its recorded baseline.

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod source;
pub mod store;
pub mod track;
pub mod watch;

pub use error::{Result, StorewatchError};
