use crate::catalog::Catalog;
use crate::domain::{Decimal, SituationalBonuses};

/// Combined carry capacity factor of mount, bag and active bonuses.
///
/// Unknown mount or bag keys contribute 1.0.
pub fn total_carry_multiplier(
    mount: &str,
    bag: &str,
    bonuses: SituationalBonuses,
    catalog: &Catalog,
) -> Decimal {
    let mut total = catalog.mount_multiplier(mount) * catalog.bag_multiplier(bag);
    if bonuses.pork_pie {
        total = total * catalog.bonuses.pork_pie;
    }
    if bonuses.lymhurst_bonus {
        total = total * catalog.bonuses.lymhurst_bonus;
    }
    if bonuses.avalonian_roads {
        total = total * catalog.bonuses.avalonian_roads;
    }
    total
}

/// Per-unit transport cost factor in `[0.25, 1.0]`.
///
/// `max(0.25, 1 / max(1, total_carry))`: more capacity lowers the factor,
/// capacity below baseline never raises it above 1.
pub fn effective_carry_multiplier(
    mount: &str,
    bag: &str,
    bonuses: SituationalBonuses,
    catalog: &Catalog,
) -> Decimal {
    let floor = Decimal::from_scaled(25, 2);
    let total = total_carry_multiplier(mount, bag, bonuses, catalog);
    let inverse = Decimal::one()
        .checked_div(std::cmp::max(Decimal::one(), total))
        .unwrap_or_else(Decimal::one);
    std::cmp::max(floor, inverse)
}
