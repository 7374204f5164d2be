//! Domain and wire models.
//!
//! Contains the tracked-item domain type, the storefront wire responses
//! (search and price lookup), and the on-disk persistence record.

pub mod item;
pub mod persist;
pub mod price;
pub mod search;

pub use item::TrackedItem;
pub use persist::PersistedItem;
pub use search::SearchHit;
