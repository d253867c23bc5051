//! Per-request transport configuration.

use crate::domain::{City, Decimal};
use serde::{Deserialize, Serialize};

/// Temporary or situational carry bonuses, each independently toggled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationalBonuses {
    #[serde(default)]
    pub pork_pie: bool,
    #[serde(default)]
    pub lymhurst_bonus: bool,
    #[serde(default)]
    pub avalonian_roads: bool,
}

/// Equipment and route selection for one computation.
///
/// Mount and bag are catalog keys; unknown keys are neutral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    #[serde(default = "none_key")]
    pub mount: String,
    #[serde(default = "none_key")]
    pub bag: String,
    #[serde(default)]
    pub bonuses: SituationalBonuses,
    #[serde(default = "City::caerleon")]
    pub origin: City,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_unit_cost: Option<Decimal>,
}

fn none_key() -> String {
    "None".to_string()
}

fn one() -> u32 {
    1
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            mount: none_key(),
            bag: none_key(),
            bonuses: SituationalBonuses::default(),
            origin: City::caerleon(),
            quantity: 1,
            base_unit_cost: None,
        }
    }
}

impl TransportConfig {
    pub fn with_origin(mut self, origin: City) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    pub fn with_bag(mut self, bag: impl Into<String>) -> Self {
        self.bag = bag.into();
        self
    }

    pub fn with_bonuses(mut self, bonuses: SituationalBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_base_unit_cost(mut self, cost: Decimal) -> Self {
        self.base_unit_cost = Some(cost);
        self
    }

    /// Quantity used in arithmetic; zero counts as one unit.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}
