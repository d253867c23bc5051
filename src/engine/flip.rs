//! Single-item flip: fill the best buy order, relist at the best sell order.

use crate::domain::{City, Decimal, ItemDescriptor, PriceObservation, TransportConfig};
use serde::Serialize;

use super::transport::TransportModel;
use super::weight::resolve_weight;
use super::{profit_per_weight, roi_percent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipSummary {
    pub buy_city: Option<City>,
    pub buy_price: Decimal,
    pub sell_city: Option<City>,
    pub sell_price: Decimal,
    pub sell_after_tax: Decimal,
    pub transport_cost: u64,
    pub profit: Decimal,
    pub roi: Decimal,
    pub ppw: Decimal,
    pub weight: Decimal,
}

/// First observation holding the best positive price according to `better`.
fn best_by<'a>(
    observations: &'a [PriceObservation],
    price: impl Fn(&PriceObservation) -> Decimal,
    better: impl Fn(Decimal, Decimal) -> bool,
) -> Option<&'a PriceObservation> {
    observations
        .iter()
        .filter(|o| price(o).is_positive())
        .fold(None, |best: Option<&PriceObservation>, o| match best {
            Some(b) if !better(price(o), price(b)) => Some(b),
            _ => Some(o),
        })
}

/// Evaluate a flip of `config.quantity` units.
///
/// Missing sides count as 0; `sales_tax_rate` is taken off the sell side and
/// the result floored to whole silver.
pub fn evaluate_flip(
    item: &ItemDescriptor,
    observations: &[PriceObservation],
    config: &TransportConfig,
    sales_tax_rate: Decimal,
    model: &TransportModel,
) -> FlipSummary {
    let best_buy = best_by(observations, |o| o.buy_price_max, |a, b| a > b);
    let best_sell = best_by(observations, |o| o.sell_price_min, |a, b| a < b);

    let buy_price = best_buy.map(|o| o.buy_price_max).unwrap_or_default();
    let sell_price = best_sell.map(|o| o.sell_price_min).unwrap_or_default();
    let sell_after_tax = (sell_price * (Decimal::one() - sales_tax_rate)).floor();

    let weight = resolve_weight(item, model.catalog());
    let quantity = Decimal::from(config.effective_quantity());
    let transport_cost = model.estimate(weight, config);

    let profit = ((sell_after_tax - buy_price) * quantity - Decimal::from(transport_cost))
        .round_half_up();

    FlipSummary {
        buy_city: best_buy.map(|o| o.city.clone()),
        buy_price,
        sell_city: best_sell.map(|o| o.city.clone()),
        sell_price,
        sell_after_tax,
        transport_cost,
        profit,
        roi: roi_percent(profit, buy_price * quantity),
        ppw: profit_per_weight(profit, weight),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn obs(city: &str, sell: &str, buy: &str) -> PriceObservation {
        PriceObservation::new(City::new(city), d(sell), d(buy))
    }

    fn bow() -> ItemDescriptor {
        ItemDescriptor::new(ItemId::new("T4_BOW"))
    }

    fn tax() -> Decimal {
        d("0.065")
    }

    #[test]
    fn test_flip_figures() {
        let observations = vec![
            obs("Bridgewatch", "1200", "900"),
            obs("Martlock", "1500", "1000"),
            obs("Lymhurst", "0", "0"),
        ];
        let summary = evaluate_flip(
            &bow(),
            &observations,
            &TransportConfig::default(),
            tax(),
            &TransportModel::standard(),
        );

        assert_eq!(summary.buy_city, Some(City::new("Martlock")));
        assert_eq!(summary.buy_price, d("1000"));
        assert_eq!(summary.sell_city, Some(City::new("Bridgewatch")));
        assert_eq!(summary.sell_after_tax, d("1122"));
        assert_eq!(summary.transport_cost, 20);
        assert_eq!(summary.profit, d("102"));
        assert_eq!(summary.roi, d("10.2"));
        assert_eq!(summary.ppw, d("25.5"));
    }

    #[test]
    fn test_quantity_scales_margin_and_transport() {
        let observations = vec![obs("Bridgewatch", "1200", "900"), obs("Martlock", "1500", "1000")];
        let summary = evaluate_flip(
            &bow(),
            &observations,
            &TransportConfig::default().with_quantity(3),
            tax(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.transport_cost, 60);
        assert_eq!(summary.profit, d("306"));
        assert_eq!(summary.roi, d("10.2"));
        assert_eq!(summary.ppw, d("76.5"));
    }

    #[test]
    fn test_tax_is_floored() {
        // 999 × 0.935 = 934.065
        let observations = vec![obs("Thetford", "999", "0")];
        let summary = evaluate_flip(
            &bow(),
            &observations,
            &TransportConfig::default(),
            tax(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.sell_after_tax, d("934"));
        assert_eq!(summary.buy_city, None);
        assert_eq!(summary.roi, Decimal::zero());
    }

    #[test]
    fn test_ties_keep_first_observation() {
        let observations = vec![
            obs("Lymhurst", "800", "500"),
            obs("Thetford", "800", "500"),
        ];
        let summary = evaluate_flip(
            &bow(),
            &observations,
            &TransportConfig::default(),
            tax(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.buy_city, Some(City::new("Lymhurst")));
        assert_eq!(summary.sell_city, Some(City::new("Lymhurst")));
    }

    #[test]
    fn test_no_data_degrades_to_transport_loss() {
        let summary = evaluate_flip(
            &bow(),
            &[],
            &TransportConfig::default(),
            tax(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.buy_price, Decimal::zero());
        assert_eq!(summary.sell_price, Decimal::zero());
        assert_eq!(summary.profit, d("-20"));
        assert_eq!(summary.ppw, d("-5"));
    }
}
