//! Stable row ordering for deterministic ranking.

use crate::domain::ComparisonRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column a comparison table can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Candidate,
    SellPrice,
    BuyPrice,
    ReferencePrice,
    TransportCost,
    BonusValue,
    #[default]
    NetProfit,
    Roi,
    Ppw,
}

impl SortKey {
    /// Parse the camelCase column name used by the API.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "candidate" | "city" | "tier" => Some(SortKey::Candidate),
            "sellPrice" => Some(SortKey::SellPrice),
            "buyPrice" => Some(SortKey::BuyPrice),
            "referencePrice" => Some(SortKey::ReferencePrice),
            "transportCost" | "transport" => Some(SortKey::TransportCost),
            "bonusValue" | "journal" => Some(SortKey::BonusValue),
            "netProfit" | "profit" => Some(SortKey::NetProfit),
            "roi" => Some(SortKey::Roi),
            "ppw" => Some(SortKey::Ppw),
            _ => None,
        }
    }

    fn compare(&self, a: &ComparisonRow, b: &ComparisonRow) -> Ordering {
        match self {
            SortKey::Candidate => a.key.cmp(&b.key),
            SortKey::SellPrice => a.sell_price.cmp(&b.sell_price),
            SortKey::BuyPrice => a.buy_price.cmp(&b.buy_price),
            SortKey::ReferencePrice => a.reference_price.cmp(&b.reference_price),
            SortKey::TransportCost => a.transport_cost.cmp(&b.transport_cost),
            SortKey::BonusValue => a.bonus_value.cmp(&b.bonus_value),
            SortKey::NetProfit => a.net_profit.cmp(&b.net_profit),
            SortKey::Roi => a.roi.cmp(&b.roi),
            SortKey::Ppw => a.ppw.cmp(&b.ppw),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Sort rows in place by `key`.
///
/// The sort is stable: rows with equal keys keep the order in which the
/// candidates were enumerated, in both directions.
pub fn sort_rows(rows: &mut [ComparisonRow], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = key.compare(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Best row by net profit, or `None` when there are no rows.
///
/// Equivalent to the head of a stable descending sort on net profit: the
/// earliest row wins a tie.
pub fn pick_best(rows: &[ComparisonRow]) -> Option<&ComparisonRow> {
    rows.iter().fold(None, |best: Option<&ComparisonRow>, row| match best {
        Some(current) if current.net_profit >= row.net_profit => Some(current),
        _ => Some(row),
    })
}
