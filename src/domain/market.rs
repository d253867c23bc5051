//! Market observations as delivered by the data source.

use crate::domain::{City, Decimal, ItemId, VariantKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest order-book extremes for one item in one city.
///
/// Missing fields are zero: an absent price is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub city: City,
    #[serde(default)]
    pub sell_price_min: Decimal,
    #[serde(default)]
    pub buy_price_max: Decimal,
    #[serde(default)]
    pub sell_quantity: u64,
    #[serde(default)]
    pub buy_quantity: u64,
}

impl PriceObservation {
    pub fn new(city: City, sell_price_min: Decimal, buy_price_max: Decimal) -> Self {
        Self {
            item_id: None,
            city,
            sell_price_min,
            buy_price_max,
            sell_quantity: 0,
            buy_quantity: 0,
        }
    }

    pub fn for_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Zero-valued placeholder for a city with no data.
    pub fn empty(city: City) -> Self {
        Self::new(city, Decimal::zero(), Decimal::zero())
    }
}

/// Central venue statistics for one tier/enchant variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStat {
    pub variant: VariantKey,
    #[serde(default)]
    pub sell_price: Decimal,
    #[serde(default)]
    pub buy_price: Decimal,
    #[serde(default)]
    pub volume: u64,
    /// Average minutes for an order to fill.
    #[serde(default)]
    pub fill_time: Decimal,
    /// 0-100.
    #[serde(default)]
    pub demand: u8,
}

impl TierStat {
    pub fn empty(variant: VariantKey) -> Self {
        Self {
            variant,
            sell_price: Decimal::zero(),
            buy_price: Decimal::zero(),
            volume: 0,
            fill_time: Decimal::zero(),
            demand: 0,
        }
    }
}

/// One daily bucket of the central venue price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub avg_price: Decimal,
    pub item_count: u64,
}
