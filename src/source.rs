//! Price source client for the storefront API.
//!
//! [`PriceSource`] is the seam between the rest of the system and the
//! remote storefront; [`SteamClient`] is the production implementation
//! over the Steam web API. Tests substitute a scripted source.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::price::AppDetailsResponse;
use crate::models::search::{SearchHit, StoreSearchResponse};
use crate::{Result, StorewatchError};

/// Read-only view of the storefront: text search and per-item price lookup.
///
/// Absence of price data is a normal result (`Ok(None)`), distinct from a
/// network or parse failure
/// ([`SourceUnavailable`](StorewatchError::SourceUnavailable)).
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Searches the storefront by text.
    ///
    /// Zero matches yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// An empty or whitespace-only query is rejected with
    /// [`InvalidInput`](StorewatchError::InvalidInput) before any network
    /// call is issued.
    async fn search(&self, query: &str, region: &str, language: &str)
    -> Result<Vec<SearchHit>>;

    /// Looks up the current price of `appid` in `region`.
    ///
    /// Returns `Ok(None)` when the storefront has no price data for the
    /// item (free, delisted, or unavailable in the region).
    async fn quote(&self, appid: u64, region: &str) -> Result<Option<Decimal>>;
}

/// Client for the Steam storefront web API.
#[derive(Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    base_url: String,
}

impl SteamClient {
    /// Creates a client against the given API base URL (no trailing slash).
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PriceSource for SteamClient {
    async fn search(
        &self,
        query: &str,
        region: &str,
        language: &str,
    ) -> Result<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(StorewatchError::InvalidInput(
                "search query is empty".to_string(),
            ));
        }

        let url = format!("{}/storesearch", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("term", query), ("cc", region), ("l", language), ("fuzzy", "1")])
            .send()
            .await
            .map_err(|e| StorewatchError::SourceUnavailable(format!("search request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorewatchError::SourceUnavailable(format!(
                "search returned HTTP {status}"
            )));
        }

        let body: StoreSearchResponse = response
            .json()
            .await
            .map_err(|e| StorewatchError::SourceUnavailable(format!("search response: {e}")))?;

        let hits = body.items.into_vec();
        debug!(query, hits = hits.len(), "storefront search completed");
        Ok(hits)
    }

    async fn quote(&self, appid: u64, region: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/appdetails", self.base_url);
        let appid_param = appid.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("appids", appid_param.as_str()),
                ("cc", region),
                ("filters", "price_overview"),
            ])
            .send()
            .await
            .map_err(|e| StorewatchError::SourceUnavailable(format!("price request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorewatchError::SourceUnavailable(format!(
                "price lookup returned HTTP {status}"
            )));
        }

        let body: AppDetailsResponse = response
            .json()
            .await
            .map_err(|e| StorewatchError::SourceUnavailable(format!("price response: {e}")))?;

        let price = body.price_for(appid);
        debug!(appid, region, price = ?price, "price lookup completed");
        Ok(price)
    }
}
