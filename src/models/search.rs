//! Wire models for the storefront `storesearch` endpoint.

use serde::Deserialize;

/// Response body of the `storesearch` endpoint.
///
/// A missing `items` field decodes as an empty list: zero matches is a
/// normal response, not an error.
#[derive(Debug, Deserialize)]
pub struct StoreSearchResponse {
    #[serde(default)]
    pub items: OneOrMany<SearchHit>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One search match: the storefront id and display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub name: String,
}

/// Tolerates both response shapes the storefront has been observed to
/// produce: a list of matches, or a single best match. The canonical
/// contract is the list form; [`OneOrMany::into_vec`] wraps a lone match
/// as a one-element sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalizes to the list form.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}
