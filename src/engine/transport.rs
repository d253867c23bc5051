use crate::catalog::Catalog;
use crate::domain::{City, Decimal, TransportConfig};

use super::carry::effective_carry_multiplier;

/// Transport cost model: catalog lookups plus the base silver cost per
/// weight unit, which a [`TransportConfig`] may override per request.
#[derive(Debug, Clone, Copy)]
pub struct TransportModel<'a> {
    catalog: &'a Catalog,
    base_unit_cost: Decimal,
}

impl<'a> TransportModel<'a> {
    pub fn new(catalog: &'a Catalog, base_unit_cost: Decimal) -> Self {
        Self {
            catalog,
            base_unit_cost,
        }
    }

    /// Standard catalog with 5 silver per weight unit.
    pub fn standard() -> TransportModel<'static> {
        TransportModel::new(Catalog::standard(), Decimal::from(5u64))
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn carry_multiplier(&self, config: &TransportConfig) -> Decimal {
        effective_carry_multiplier(&config.mount, &config.bag, config.bonuses, self.catalog)
    }

    /// Silver cost of moving `config.quantity` units of `weight` from the
    /// configured origin.
    pub fn estimate(&self, weight: Decimal, config: &TransportConfig) -> u64 {
        self.estimate_from(weight, config, &config.origin)
    }

    /// Like [`TransportModel::estimate`] with an explicit origin city.
    ///
    /// `round(weight × qty × route × base × carry)`, never negative. Unknown
    /// cities use a neutral route multiplier.
    pub fn estimate_from(&self, weight: Decimal, config: &TransportConfig, origin: &City) -> u64 {
        let quantity = Decimal::from(config.effective_quantity());
        let route = self.catalog.route_multiplier(origin);
        let base = config.base_unit_cost.unwrap_or(self.base_unit_cost);
        let carry = self.carry_multiplier(config);

        let raw = weight * quantity * route * base * carry;
        raw.round_half_up().to_u64_saturating()
    }
}
