use rust_decimal_macros::dec;

use storewatch::models::persist::PersistedItem;
use storewatch::models::price::AppDetailsResponse;
use storewatch::models::search::StoreSearchResponse;

#[test]
fn deserialize_search_response_list_shape() {
    let json = r#"{
        "total": 2,
        "items": [
            { "id": 570, "name": "Dota 2", "type": "app" },
            { "id": 440, "name": "Team Fortress 2", "type": "app" }
        ]
    }"#;

    let response: StoreSearchResponse = serde_json::from_str(json).unwrap();
    let hits = response.items.into_vec();

    assert_eq!(response.total, Some(2));
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 570);
    assert_eq!(hits[0].name, "Dota 2");
    assert_eq!(hits[1].id, 440);
}

#[test]
fn deserialize_search_response_single_match_shape() {
    // Some storefront variants return a lone best match instead of a list.
    let json = r#"{
        "items": { "id": 620, "name": "Portal 2" }
    }"#;

    let response: StoreSearchResponse = serde_json::from_str(json).unwrap();
    let hits = response.items.into_vec();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 620);
    assert_eq!(hits[0].name, "Portal 2");
}

#[test]
fn deserialize_search_response_without_items() {
    let json = r#"{ "total": 0 }"#;

    let response: StoreSearchResponse = serde_json::from_str(json).unwrap();
    assert!(response.items.into_vec().is_empty());
}

#[test]
fn price_overview_converts_cents_to_decimal() {
    let json = r#"{
        "570": {
            "success": true,
            "data": {
                "price_overview": {
                    "currency": "USD",
                    "initial": 1999,
                    "final": 1499,
                    "discount_percent": 25
                }
            }
        }
    }"#;

    let response: AppDetailsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.price_for(570), Some(dec!(14.99)));
}

#[test]
fn price_absent_when_success_is_false() {
    let json = r#"{ "570": { "success": false } }"#;

    let response: AppDetailsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.price_for(570), None);
}

#[test]
fn price_absent_without_price_overview() {
    // Free or delisted items come back successful but priceless.
    let json = r#"{ "570": { "success": true, "data": {} } }"#;

    let response: AppDetailsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.price_for(570), None);
}

#[test]
fn price_absent_for_unrequested_appid() {
    let json = r#"{
        "570": {
            "success": true,
            "data": { "price_overview": { "final": 1499 } }
        }
    }"#;

    let response: AppDetailsResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.price_for(440), None);
}

#[test]
fn persisted_item_round_trips_through_json() {
    let record = PersistedItem {
        id: 570,
        name: "Dota 2".to_string(),
        price: dec!(19.99),
        region: Some("de".to_string()),
    };

    let json = serde_json::to_string(&record).unwrap();
    let decoded: PersistedItem = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, record);
}

#[test]
fn persisted_item_region_is_optional() {
    let json = r#"{ "id": 440, "name": "Team Fortress 2", "price": "9.99" }"#;

    let decoded: PersistedItem = serde_json::from_str(json).unwrap();
    assert_eq!(decoded.price, dec!(9.99));
    assert!(decoded.region.is_none());
}

#[test]
fn persisted_item_rebuilds_with_configured_channel() {
    let record = PersistedItem {
        id: 570,
        name: "Dota 2".to_string(),
        price: dec!(19.99),
        region: None,
    };

    let item = record.into_item(123_456);
    assert_eq!(item.appid, 570);
    assert_eq!(item.baseline_price, dec!(19.99));
    assert_eq!(item.channel_id, 123_456);
}
