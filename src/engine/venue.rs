//! Central venue analytics: a snapshot over all variants and a trend over the
//! daily price history.

use crate::domain::{Decimal, HistoryPoint, TierStat, VariantKey};
use serde::Serialize;

use super::roi_percent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    /// Mean sell price over variants that have one.
    pub average_price: Decimal,
    /// 0-10.
    pub demand_rating: u8,
    pub min_sell: Decimal,
    pub max_buy: Decimal,
    pub spread: Decimal,
    pub roi: Decimal,
    /// Variant with the highest sell price.
    pub best_variant: Option<VariantKey>,
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    let total: Decimal = values.iter().copied().sum();
    total.checked_div(Decimal::from(values.len() as u64))
}

pub fn summarize_venue(stats: &[TierStat]) -> VenueSummary {
    let sell_prices: Vec<Decimal> = stats
        .iter()
        .map(|s| s.sell_price)
        .filter(Decimal::is_positive)
        .collect();
    let average_price = mean(&sell_prices)
        .map(|avg| avg.round_half_up())
        .unwrap_or_default();

    let demands: Vec<Decimal> = stats.iter().map(|s| Decimal::from(u32::from(s.demand))).collect();
    let demand_rating = mean(&demands)
        .and_then(|avg| avg.checked_div(Decimal::from(10u64)))
        .map(|rating| rating.round_half_up().to_u64_saturating().min(10) as u8)
        .unwrap_or(0);

    let min_sell = sell_prices.iter().copied().min().unwrap_or_default();
    let max_buy = stats
        .iter()
        .map(|s| s.buy_price)
        .filter(Decimal::is_positive)
        .max()
        .unwrap_or_default();

    let spread = if min_sell.is_positive() && max_buy.is_positive() {
        min_sell - max_buy
    } else {
        Decimal::zero()
    };

    let best_variant = stats
        .iter()
        .filter(|s| s.sell_price.is_positive())
        .fold(None, |best: Option<&TierStat>, s| match best {
            Some(b) if s.sell_price <= b.sell_price => Some(b),
            _ => Some(s),
        })
        .map(|s| s.variant);

    VenueSummary {
        average_price,
        demand_rating,
        min_sell,
        max_buy,
        spread,
        roi: roi_percent(spread, max_buy),
        best_variant,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Number of daily points inside the window.
    pub points: usize,
    pub latest: Decimal,
    pub average: Decimal,
    /// Latest vs. first point of the window, percent with one decimal.
    pub change_percent: Decimal,
    pub total_volume: u64,
}

/// Summarize the last `window` points in chronological order.
pub fn summarize_history(points: &[HistoryPoint], window: usize) -> HistorySummary {
    let mut ordered: Vec<&HistoryPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.timestamp);
    let recent = &ordered[ordered.len().saturating_sub(window)..];

    let prices: Vec<Decimal> = recent.iter().map(|p| p.avg_price).collect();
    let first = prices.first().copied().unwrap_or_default();
    let latest = prices.last().copied().unwrap_or_default();

    HistorySummary {
        points: recent.len(),
        latest,
        average: mean(&prices)
            .map(|avg| avg.round_half_up())
            .unwrap_or_default(),
        change_percent: roi_percent(latest - first, first),
        total_volume: recent
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.item_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn stat(tier: u8, enchant: u8, sell: &str, buy: &str, demand: u8) -> TierStat {
        TierStat {
            sell_price: d(sell),
            buy_price: d(buy),
            demand,
            ..TierStat::empty(VariantKey::new(tier, enchant))
        }
    }

    fn point(day: u32, price: &str, count: u64) -> HistoryPoint {
        HistoryPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            avg_price: d(price),
            item_count: count,
        }
    }

    #[test]
    fn test_venue_summary() {
        let stats = vec![
            stat(4, 0, "1000", "800", 40),
            stat(5, 0, "2500", "2000", 70),
            stat(6, 0, "0", "0", 0),
            stat(7, 0, "9000", "0", 90),
        ];
        let summary = summarize_venue(&stats);
        // (1000 + 2500 + 9000) / 3 = 4166.67
        assert_eq!(summary.average_price, d("4167"));
        // 200 / 4 / 10 = 5
        assert_eq!(summary.demand_rating, 5);
        assert_eq!(summary.min_sell, d("1000"));
        assert_eq!(summary.max_buy, d("2000"));
        assert_eq!(summary.spread, d("-1000"));
        assert_eq!(summary.roi, d("-50"));
        assert_eq!(summary.best_variant, Some(VariantKey::new(7, 0)));
    }

    #[test]
    fn test_spread_needs_both_sides() {
        let summary = summarize_venue(&[stat(4, 1, "1500", "0", 10)]);
        assert_eq!(summary.spread, Decimal::zero());
        assert_eq!(summary.roi, Decimal::zero());
    }

    #[test]
    fn test_empty_venue() {
        let summary = summarize_venue(&[]);
        assert_eq!(summary.average_price, Decimal::zero());
        assert_eq!(summary.demand_rating, 0);
        assert_eq!(summary.best_variant, None);
    }

    #[test]
    fn test_best_variant_tie_keeps_first() {
        let stats = vec![stat(5, 1, "3000", "0", 0), stat(6, 0, "3000", "0", 0)];
        assert_eq!(summarize_venue(&stats).best_variant, Some(VariantKey::new(5, 1)));
    }

    #[test]
    fn test_history_window_and_change() {
        let points = vec![
            point(4, "1300", 5),
            point(1, "900", 3),
            point(2, "1000", 4),
            point(3, "1100", 2),
        ];
        let summary = summarize_history(&points, 3);
        assert_eq!(summary.points, 3);
        assert_eq!(summary.latest, d("1300"));
        assert_eq!(summary.average, d("1133"));
        assert_eq!(summary.change_percent, d("30"));
        assert_eq!(summary.total_volume, 11);
    }

    #[test]
    fn test_history_empty() {
        let summary = summarize_history(&[], 10);
        assert_eq!(summary.points, 0);
        assert_eq!(summary.latest, Decimal::zero());
        assert_eq!(summary.change_percent, Decimal::zero());
    }
}
