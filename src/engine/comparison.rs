//! Multi-candidate comparison: one row per declared city or variant.
//!
//! Weight and journal value are resolved once per item and shared by every
//! row. Missing observations count as zero prices.

use crate::domain::{
    CandidateKey, City, ComparisonRow, Decimal, ItemDescriptor, ItemId, JournalTreatment,
    PriceObservation, TierStat, TransportConfig, VariantKey, VenueActivity,
};

use super::journal::classify;
use super::transport::TransportModel;
use super::weight::resolve_weight;
use super::{profit_per_weight, roi_percent};

/// Per-item figures shared by all rows of one comparison.
struct ItemBasis {
    weight: Decimal,
    bonus_value: Decimal,
    quantity: Decimal,
    journal: JournalTreatment,
}

impl ItemBasis {
    fn new(
        item: &ItemDescriptor,
        config: &TransportConfig,
        journal: JournalTreatment,
        model: &TransportModel,
    ) -> Self {
        Self {
            weight: resolve_weight(item, model.catalog()),
            bonus_value: classify(item).baseline_value,
            quantity: Decimal::from(config.effective_quantity()),
            journal,
        }
    }

    fn row(&self, candidate: Candidate) -> ComparisonRow {
        let revenue = candidate.reference_price * self.quantity;
        let outlay = candidate.buy_price * self.quantity;
        let net_profit = (revenue - outlay - Decimal::from(candidate.transport_cost)
            + self.journal.apply(self.bonus_value))
        .round_half_up();

        ComparisonRow {
            key: candidate.key,
            sell_price: candidate.sell_price,
            buy_price: candidate.buy_price,
            reference_price: candidate.reference_price,
            transport_cost: candidate.transport_cost,
            bonus_value: self.bonus_value,
            net_profit,
            roi: roi_percent(net_profit, outlay),
            ppw: profit_per_weight(net_profit, self.weight),
            route_multiplier: candidate.route_multiplier,
            activity: candidate.activity,
        }
    }
}

struct Candidate {
    key: CandidateKey,
    sell_price: Decimal,
    buy_price: Decimal,
    reference_price: Decimal,
    transport_cost: u64,
    route_multiplier: Decimal,
    activity: Option<VenueActivity>,
}

/// Last observation in `city` whose item label satisfies `describes`, or a
/// zero-valued one.
fn observation_for(
    observations: &[PriceObservation],
    city: &City,
    describes: impl Fn(Option<&ItemId>) -> bool,
) -> PriceObservation {
    observations
        .iter()
        .rev()
        .find(|o| &o.city == city && describes(o.item_id.as_ref()))
        .cloned()
        .unwrap_or_else(|| PriceObservation::empty(city.clone()))
}

/// Buy in each declared city, sell at `reference_price`.
///
/// Rows come back in the catalog's city order; transport for each row is
/// computed with that city as origin.
pub fn build_city_comparison(
    item: &ItemDescriptor,
    observations: &[PriceObservation],
    reference_price: Decimal,
    config: &TransportConfig,
    journal: JournalTreatment,
    model: &TransportModel,
) -> Vec<ComparisonRow> {
    let basis = ItemBasis::new(item, config, journal, model);
    let catalog = model.catalog();

    catalog
        .cities()
        .into_iter()
        .map(|city| {
            // Unlabelled observations describe the requested item.
            let observation = observation_for(observations, &city, |label| {
                label.map_or(true, |id| id == &item.id)
            });
            let transport_cost = model.estimate_from(basis.weight, config, &city);
            basis.row(Candidate {
                route_multiplier: catalog.route_multiplier(&city),
                key: CandidateKey::city(city),
                sell_price: observation.sell_price_min,
                buy_price: observation.buy_price_max,
                reference_price,
                transport_cost,
                activity: None,
            })
        })
        .collect()
}

/// Buy each declared tier/enchant variant in the configured origin city and
/// sell it at the central venue.
///
/// The reference price of a row is the venue sell price of that variant; the
/// acquisition price is the origin city's best buy order for the variant's
/// item id. Variants without data produce zero-priced rows.
pub fn build_variant_comparison(
    item: &ItemDescriptor,
    tier_stats: &[TierStat],
    observations: &[PriceObservation],
    config: &TransportConfig,
    journal: JournalTreatment,
    model: &TransportModel,
) -> Vec<ComparisonRow> {
    let basis = ItemBasis::new(item, config, journal, model);
    let catalog = model.catalog();
    let transport_cost = model.estimate(basis.weight, config);
    let route_multiplier = catalog.route_multiplier(&config.origin);

    catalog
        .variants
        .iter()
        .map(|&variant| {
            let stat = stat_for(tier_stats, variant);
            let observation = match item.id.for_variant(variant) {
                Some(variant_id) => {
                    observation_for(observations, &config.origin, |label| match label {
                        Some(id) => id == &variant_id,
                        None => variant_id == item.id,
                    })
                }
                None => PriceObservation::empty(config.origin.clone()),
            };
            basis.row(Candidate {
                key: CandidateKey::variant(variant),
                sell_price: observation.sell_price_min,
                buy_price: observation.buy_price_max,
                reference_price: stat.sell_price,
                transport_cost,
                route_multiplier,
                activity: Some(VenueActivity {
                    volume: stat.volume,
                    fill_time: stat.fill_time,
                    demand: stat.demand,
                }),
            })
        })
        .collect()
}

fn stat_for(tier_stats: &[TierStat], variant: VariantKey) -> TierStat {
    tier_stats
        .iter()
        .rev()
        .find(|s| s.variant == variant)
        .copied()
        .unwrap_or_else(|| TierStat::empty(variant))
}
