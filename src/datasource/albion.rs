//! Albion Online Data project API client implementation.

use super::{DataSource, DataSourceError};
use crate::domain::{City, Decimal, HistoryPoint, ItemId, PriceObservation, TierStat, VariantKey};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Location name of the central venue in the history endpoint.
const VENUE_LOCATION: &str = "Blackmarket";

/// Market data source backed by the public Albion Online Data API.
#[derive(Debug, Clone)]
pub struct AlbionDataSource {
    client: Client,
    base_url: String,
}

impl AlbionDataSource {
    /// Create a new data source with a per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Other(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DataSourceError> {
        let url = format!("{}{}", self.base_url, path);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        backoff::Error::transient(DataSourceError::Timeout)
                    } else {
                        backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                    }
                })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(DataSourceError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(DataSourceError::HttpError {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl DataSource for AlbionDataSource {
    async fn fetch_city_prices(
        &self,
        item_ids: &[ItemId],
        cities: &[City],
    ) -> Result<Vec<PriceObservation>, DataSourceError> {
        let ids = item_ids
            .iter()
            .map(ItemId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        debug!("Fetching city prices for items={}, cities={}", ids, cities.len());

        let locations = cities
            .iter()
            .map(location_param)
            .collect::<Vec<_>>()
            .join(",");
        let query = [("locations", locations), ("qualities", "1".to_string())];
        let raw: Vec<RawPrice> = self
            .get_json(&format!("/stats/prices/{}", ids), &query)
            .await?;

        let mut observations = Vec::new();
        for entry in raw {
            match resolve_city(&entry.city, cities) {
                Some(city) => observations.push(entry.into_observation(city)),
                None => debug!("Skipping price entry for unrequested city {}", entry.city),
            }
        }
        Ok(observations)
    }

    async fn fetch_venue_stats(&self, item_id: &ItemId) -> Result<Vec<TierStat>, DataSourceError> {
        debug!("Fetching venue stats for item={}", item_id);

        let raw: RawVenueStats = self
            .get_json(&format!("/stats/blackmarket/{}", item_id), &[])
            .await?;
        Ok(parse_venue_stats(raw, item_id.enchant()))
    }

    async fn fetch_history(
        &self,
        item_id: &ItemId,
        days: u32,
    ) -> Result<Vec<HistoryPoint>, DataSourceError> {
        debug!("Fetching history for item={}, days={}", item_id, days);

        let query = [
            ("locations", VENUE_LOCATION.to_string()),
            ("time-scale", "24".to_string()),
        ];
        let raw: Vec<RawHistorySeries> = self
            .get_json(&format!("/stats/history/{}", item_id), &query)
            .await?;
        Ok(parse_history(raw, days as usize))
    }
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    city: String,
    #[serde(default)]
    item_id: Option<String>,
    #[serde(default)]
    sell_price_min: Decimal,
    #[serde(default)]
    buy_price_max: Decimal,
}

impl RawPrice {
    fn into_observation(self, city: City) -> PriceObservation {
        let observation = PriceObservation::new(city, self.sell_price_min, self.buy_price_max);
        match self.item_id {
            Some(id) => observation.for_item(ItemId::new(id)),
            None => observation,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawVenueStats {
    #[serde(default)]
    tiers: std::collections::BTreeMap<String, RawTier>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTier {
    #[serde(default)]
    sell_price_min: Decimal,
    #[serde(default)]
    buy_price_max: Decimal,
    #[serde(default)]
    total_volume: u64,
    #[serde(default)]
    avg_fill_time: Decimal,
    #[serde(default)]
    demand: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawHistorySeries {
    #[serde(default)]
    data: Vec<RawHistoryPoint>,
}

#[derive(Debug, Deserialize)]
struct RawHistoryPoint {
    timestamp: String,
    #[serde(default)]
    avg_price: Decimal,
    #[serde(default)]
    item_count: u64,
}

/// Query form of a city name: the API spells locations without spaces.
fn location_param(city: &City) -> String {
    city.as_str().replace(' ', "")
}

fn compact(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Map an API location name back onto one of the requested cities.
fn resolve_city(name: &str, cities: &[City]) -> Option<City> {
    let wanted = match compact(name).as_str() {
        "ftsterling" => "fortsterling".to_string(),
        other => other.to_string(),
    };
    cities.iter().find(|c| compact(c.as_str()) == wanted).cloned()
}

fn parse_venue_stats(raw: RawVenueStats, enchant: u8) -> Vec<TierStat> {
    let mut stats = Vec::new();
    for (key, tier) in raw.tiers {
        let Ok(tier_num) = key.parse::<u8>() else {
            warn!("Skipping venue tier with invalid key {}", key);
            continue;
        };
        let demand = tier
            .demand
            .round_half_up()
            .to_u64_saturating()
            .min(100) as u8;
        stats.push(TierStat {
            variant: VariantKey::new(tier_num, enchant),
            sell_price: tier.sell_price_min,
            buy_price: tier.buy_price_max,
            volume: tier.total_volume,
            fill_time: tier.avg_fill_time,
            demand,
        });
    }
    stats.sort_by_key(|s| s.variant);
    stats
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DataSourceError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DataSourceError::ParseError(format!("Invalid timestamp {}: {}", raw, e)))
}

fn parse_history(raw: Vec<RawHistorySeries>, days: usize) -> Vec<HistoryPoint> {
    let mut points = Vec::new();
    for point in raw.into_iter().flat_map(|series| series.data) {
        match parse_timestamp(&point.timestamp) {
            Ok(timestamp) => points.push(HistoryPoint {
                timestamp,
                avg_price: point.avg_price,
                item_count: point.item_count,
            }),
            Err(e) => warn!("Failed to parse history point: {}", e),
        }
    }
    points.sort_by_key(|p| p.timestamp);
    let skip = points.len().saturating_sub(days);
    points.split_off(skip)
}
