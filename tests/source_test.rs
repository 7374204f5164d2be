use storewatch::StorewatchError;
use storewatch::source::{PriceSource, SteamClient};

/// A base URL nothing listens on; any request against it would fail with
/// `SourceUnavailable`, so an `InvalidInput` result proves the client
/// rejected the input before issuing a network call.
fn unreachable_client() -> SteamClient {
    SteamClient::new(reqwest::Client::new(), "http://127.0.0.1:1")
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_network_call() {
    let client = unreachable_client();

    let err = client.search("", "us", "english").await.unwrap_err();
    assert!(matches!(err, StorewatchError::InvalidInput(_)));
}

#[tokio::test]
async fn whitespace_query_is_rejected_before_any_network_call() {
    let client = unreachable_client();

    let err = client.search("   ", "us", "english").await.unwrap_err();
    assert!(matches!(err, StorewatchError::InvalidInput(_)));
}

#[tokio::test]
async fn network_failure_surfaces_as_source_unavailable() {
    let client = unreachable_client();

    let search_err = client.search("dota", "us", "english").await.unwrap_err();
    assert!(matches!(search_err, StorewatchError::SourceUnavailable(_)));

    let quote_err = client.quote(570, "us").await.unwrap_err();
    assert!(matches!(quote_err, StorewatchError::SourceUnavailable(_)));
}
