//! Crafting and refining: ingredient cost after return rate, plus transport
//! of the output and the journal filled along the way.

use crate::domain::{Decimal, ItemDescriptor, ItemId, TransportConfig};
use serde::{Deserialize, Serialize};

use super::journal::classify;
use super::return_rate::{apply_return_rate, combine_return_rates};
use super::transport::TransportModel;
use super::weight::resolve_weight;
use super::{profit_per_weight, roi_percent};

/// One recipe ingredient, `count` units per crafted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub item_id: ItemId,
    pub count: u32,
    pub unit_price: Decimal,
}

/// City return rate and an independent bonus rate (focus, daily bonus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnRates {
    pub base: Decimal,
    pub bonus: Decimal,
}

impl Default for ReturnRates {
    fn default() -> Self {
        Self {
            base: Decimal::from_scaled(15, 2),
            bonus: Decimal::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingSummary {
    pub ingredient_cost: Decimal,
    pub return_rate: Decimal,
    pub effective_cost: Decimal,
    pub transport_cost: u64,
    pub journal: Decimal,
    pub output_value: Decimal,
    pub profit: Decimal,
    pub roi: Decimal,
    pub ppw: Decimal,
    pub weight: Decimal,
}

/// Evaluate a batch of `config.quantity` crafts of `item`.
///
/// The journal is credited once per batch.
pub fn evaluate_crafting(
    item: &ItemDescriptor,
    ingredients: &[IngredientLine],
    output_price: Decimal,
    rates: ReturnRates,
    config: &TransportConfig,
    model: &TransportModel,
) -> CraftingSummary {
    let quantity = Decimal::from(config.effective_quantity());
    let ingredient_cost: Decimal = ingredients
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.count) * quantity)
        .sum();

    let return_rate = combine_return_rates(rates.base, rates.bonus);
    let effective_cost = apply_return_rate(ingredient_cost, return_rate);

    let weight = resolve_weight(item, model.catalog());
    let transport_cost = model.estimate(weight, config);
    let journal = classify(item).baseline_value;
    let output_value = output_price * quantity;

    let profit = (output_value - effective_cost - Decimal::from(transport_cost) + journal)
        .round_half_up();

    CraftingSummary {
        ingredient_cost,
        return_rate,
        effective_cost,
        transport_cost,
        journal,
        output_value,
        profit,
        roi: roi_percent(profit, effective_cost),
        ppw: profit_per_weight(profit, weight),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn sword() -> ItemDescriptor {
        ItemDescriptor::new(ItemId::new("T5_MAIN_SWORD"))
    }

    fn recipe() -> Vec<IngredientLine> {
        vec![
            IngredientLine {
                item_id: ItemId::new("T5_METALBAR"),
                count: 16,
                unit_price: d("300"),
            },
            IngredientLine {
                item_id: ItemId::new("T5_LEATHER"),
                count: 8,
                unit_price: d("250"),
            },
        ]
    }

    #[test]
    fn test_single_craft() {
        let summary = evaluate_crafting(
            &sword(),
            &recipe(),
            d("9000"),
            ReturnRates::default(),
            &TransportConfig::default(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.ingredient_cost, d("6800"));
        assert_eq!(summary.return_rate, d("0.15"));
        assert_eq!(summary.effective_cost, d("5780"));
        assert_eq!(summary.transport_cost, 25);
        assert_eq!(summary.journal, d("4500"));
        assert_eq!(summary.profit, d("7695"));
        assert_eq!(summary.roi, d("133.1"));
        assert_eq!(summary.ppw, d("1539"));
    }

    #[test]
    fn test_bonus_rate_lowers_cost() {
        let rates = ReturnRates {
            base: d("0.15"),
            bonus: d("0.1"),
        };
        let summary = evaluate_crafting(
            &sword(),
            &recipe(),
            d("9000"),
            rates,
            &TransportConfig::default(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.return_rate, d("0.235"));
        assert_eq!(summary.effective_cost, d("5202"));
        assert_eq!(summary.profit, d("8273"));
    }

    #[test]
    fn test_batch_credits_journal_once() {
        let summary = evaluate_crafting(
            &sword(),
            &recipe(),
            d("9000"),
            ReturnRates::default(),
            &TransportConfig::default().with_quantity(2),
            &TransportModel::standard(),
        );
        assert_eq!(summary.ingredient_cost, d("13600"));
        assert_eq!(summary.effective_cost, d("11560"));
        assert_eq!(summary.transport_cost, 50);
        assert_eq!(summary.output_value, d("18000"));
        assert_eq!(summary.profit, d("10890"));
        assert_eq!(summary.roi, d("94.2"));
    }

    #[test]
    fn test_no_ingredients_has_zero_roi() {
        let summary = evaluate_crafting(
            &sword(),
            &[],
            d("100"),
            ReturnRates::default(),
            &TransportConfig::default(),
            &TransportModel::standard(),
        );
        assert_eq!(summary.effective_cost, Decimal::zero());
        assert_eq!(summary.roi, Decimal::zero());
        // 100 - 25 + 4500
        assert_eq!(summary.profit, d("4575"));
    }

    #[test]
    fn test_huge_batch_saturates() {
        let lines = vec![IngredientLine {
            item_id: ItemId::new("T5_METALBAR"),
            count: u32::MAX,
            unit_price: d("70000000000000000000000000000"),
        }];
        let summary = evaluate_crafting(
            &sword(),
            &lines,
            d("9000"),
            ReturnRates::default(),
            &TransportConfig::default().with_quantity(u32::MAX),
            &TransportModel::standard(),
        );
        assert_eq!(summary.ingredient_cost, Decimal::max_value());
        assert!(summary.profit.is_negative());
    }

    #[test]
    fn test_rates_deserialize_with_defaults() {
        let rates: ReturnRates = serde_json::from_str(r#"{"bonus": 0.1}"#).unwrap();
        assert_eq!(rates.base, d("0.15"));
        assert_eq!(rates.bonus, d("0.1"));
    }
}
