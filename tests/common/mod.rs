#![allow(dead_code)]

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use market_margin::api::{self, AppState};
use market_margin::datasource::MockDataSource;
use market_margin::domain::{
    City, Decimal, HistoryPoint, ItemId, PriceObservation, TierStat, VariantKey,
};
use market_margin::Config;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

pub fn app(mock: MockDataSource) -> axum::Router {
    api::create_router(AppState::new(Arc::new(mock), Config::default()))
}

fn stat(
    tier: u8,
    enchant: u8,
    sell: &str,
    buy: &str,
    volume: u64,
    fill: &str,
    demand: u8,
) -> TierStat {
    TierStat {
        variant: VariantKey::new(tier, enchant),
        sell_price: d(sell),
        buy_price: d(buy),
        volume,
        fill_time: d(fill),
        demand,
    }
}

fn price(mock: MockDataSource, id: &str, city: &str, sell: &str, buy: &str) -> MockDataSource {
    mock.with_price(
        ItemId::new(id),
        PriceObservation::new(City::new(city), d(sell), d(buy)),
    )
}

/// Bow market across all six cities, venue stats for two enchant levels,
/// twelve days of history and a sword recipe. Enchant level 3 is down.
pub fn market() -> MockDataSource {
    let mut mock = MockDataSource::new();
    for (city, sell, buy) in [
        ("Caerleon", "1500", "1300"),
        ("Bridgewatch", "1250", "1000"),
        ("Martlock", "1300", "1100"),
        ("Lymhurst", "1400", "1150"),
        ("Fort Sterling", "1350", "1200"),
        ("Thetford", "1280", "1050"),
    ] {
        mock = price(mock, "T4_BOW", city, sell, buy);
    }
    mock = price(mock, "T5_BOW@1", "Caerleon", "2300", "2000");
    mock = price(mock, "T5_LEATHER", "Caerleon", "270", "250");
    mock = price(mock, "T5_MAIN_SWORD", "Caerleon", "9000", "8000");

    let history = (1..=12)
        .map(|day| HistoryPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            avg_price: Decimal::from(u64::from(1000 + 10 * day)),
            item_count: 5,
        })
        .collect();

    mock.with_venue_stats(
        ItemId::new("T4_BOW"),
        vec![stat(4, 0, "1800", "1600", 20, "30", 60)],
    )
    .with_venue_stats(
        ItemId::new("T4_BOW@1"),
        vec![stat(5, 1, "2600", "2400", 5, "120", 40)],
    )
    .with_history(ItemId::new("T4_BOW"), history)
    .with_failure(ItemId::new("T4_BOW@3"))
}

pub async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, "GET", uri, axum::body::Body::empty()).await
}

pub async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, Vec<u8>) {
    send(app, "POST", uri, axum::body::Body::from(body.to_string())).await
}

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: axum::body::Body,
) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap()
}

pub fn num(value: &serde_json::Value) -> f64 {
    value.as_f64().unwrap()
}
