//! Live storefront API tests.
//!
//! These tests hit the real Steam storefront API and require network access.
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use storewatch::source::{PriceSource, SteamClient};

const STEAM_API_URL: &str = "https://store.steampowered.com/api";

fn live_client() -> SteamClient {
    SteamClient::new(reqwest::Client::new(), STEAM_API_URL)
}

#[tokio::test]
async fn search_returns_matches_for_known_title() {
    let hits = live_client()
        .search("portal", "us", "english")
        .await
        .expect("search failed");

    assert!(!hits.is_empty(), "expected matches for 'portal'");
    assert!(hits.iter().all(|hit| hit.id > 0));
}

#[tokio::test]
async fn paid_item_quotes_a_positive_major_unit_price() {
    // Portal 2 has carried a price tag since release.
    let price = live_client()
        .quote(620, "us")
        .await
        .expect("price lookup failed");

    let price = price.expect("expected price data for Portal 2");
    assert!(price > rust_decimal::Decimal::ZERO);
    assert!(price.scale() >= 2, "expected a major-unit decimal price");
}

#[tokio::test]
async fn unknown_appid_is_absent_not_an_error() {
    let price = live_client()
        .quote(4_294_967_295, "us")
        .await
        .expect("lookup should not error for an unknown id");

    assert!(price.is_none());
}
