//! Static reference data: mounts, bags, routes, weight fallbacks, bonuses.
//!
//! Built once per process and shared read-only. Entries are kept in declared
//! order because that order is observable: the route table defines the city
//! enumeration for comparisons and the weight table is first-match.
//! Existing keys must keep their values so earlier results stay reproducible.

use crate::domain::{City, Decimal, VariantKey};
use serde::Serialize;
use std::sync::OnceLock;

/// A keyed multiplier (mount carry, bag carry or route cost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub key: &'static str,
    pub multiplier: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Fallback weight for items whose id or category contains `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRule {
    pub token: &'static str,
    pub weight: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusMultipliers {
    pub pork_pie: Decimal,
    pub lymhurst_bonus: Decimal,
    pub avalonian_roads: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub mounts: Vec<CatalogEntry>,
    pub bags: Vec<CatalogEntry>,
    /// Cost multiplier per origin city; also the declared city enumeration.
    pub routes: Vec<CatalogEntry>,
    /// Ordered, first match wins.
    pub weight_fallbacks: Vec<WeightRule>,
    pub default_weight: Decimal,
    pub bonuses: BonusMultipliers,
    /// Declared central venue variant enumeration, tier-major.
    pub variants: Vec<VariantKey>,
}

static STANDARD: OnceLock<Catalog> = OnceLock::new();

fn entry(key: &'static str, num: i64, scale: u32) -> CatalogEntry {
    CatalogEntry {
        key,
        multiplier: Decimal::from_scaled(num, scale),
        note: None,
    }
}

fn noted(key: &'static str, num: i64, scale: u32, note: &'static str) -> CatalogEntry {
    CatalogEntry {
        note: Some(note),
        ..entry(key, num, scale)
    }
}

fn rule(token: &'static str, num: i64, scale: u32) -> WeightRule {
    WeightRule {
        token,
        weight: Decimal::from_scaled(num, scale),
    }
}

impl Catalog {
    /// The process-wide catalog.
    pub fn standard() -> &'static Catalog {
        STANDARD.get_or_init(Catalog::build)
    }

    fn build() -> Catalog {
        Catalog {
            mounts: vec![
                noted("None", 10, 1, "No mount"),
                entry("T3_Ox", 18, 1),
                entry("T4_Ox", 20, 1),
                entry("T5_Ox", 22, 1),
                entry("T6_Ox", 24, 1),
                entry("T7_Ox", 26, 1),
                entry("T8_Ox", 28, 1),
                entry("Elite_Ox", 34, 1),
                noted("Transport_Mammoth", 60, 1, "Huge carry capacity"),
                entry("Spectral_Ox", 30, 1),
                entry("Giant_Stag", 16, 1),
                entry("Swiftclaw", 13, 1),
            ],
            bags: vec![
                entry("None", 100, 2),
                entry("T2_Bag", 105, 2),
                entry("T3_Bag", 110, 2),
                entry("T4_Bag", 115, 2),
                entry("T5_Bag", 125, 2),
                entry("T6_Bag", 135, 2),
            ],
            routes: vec![
                entry("Caerleon", 10, 1),
                entry("Bridgewatch", 14, 1),
                entry("Martlock", 15, 1),
                entry("Lymhurst", 13, 1),
                entry("Fort Sterling", 16, 1),
                entry("Thetford", 14, 1),
            ],
            weight_fallbacks: vec![
                rule("BAG", 10, 1),
                rule("BOW", 40, 1),
                rule("ARMOR", 60, 1),
                rule("SWORD", 50, 1),
                rule("PLATE", 80, 1),
                rule("TOOL", 20, 1),
                rule("RESOURCE", 10, 1),
            ],
            default_weight: Decimal::from_scaled(30, 1),
            bonuses: BonusMultipliers {
                pork_pie: Decimal::from_scaled(112, 2),
                lymhurst_bonus: Decimal::from_scaled(105, 2),
                avalonian_roads: Decimal::from_scaled(12, 1),
            },
            variants: (4..=8)
                .flat_map(|tier| (0..=4).map(move |enchant| VariantKey::new(tier, enchant)))
                .collect(),
        }
    }

    fn lookup(entries: &[CatalogEntry], key: &str) -> Option<Decimal> {
        entries.iter().find(|e| e.key == key).map(|e| e.multiplier)
    }

    /// Carry multiplier of a mount; unknown keys are neutral (1.0).
    pub fn mount_multiplier(&self, key: &str) -> Decimal {
        Self::lookup(&self.mounts, key).unwrap_or_else(Decimal::one)
    }

    /// Carry multiplier of a bag; unknown keys are neutral (1.0).
    pub fn bag_multiplier(&self, key: &str) -> Decimal {
        Self::lookup(&self.bags, key).unwrap_or_else(Decimal::one)
    }

    /// Route cost multiplier of an origin city; unknown cities are neutral (1.0).
    pub fn route_multiplier(&self, city: &City) -> Decimal {
        Self::lookup(&self.routes, city.as_str()).unwrap_or_else(Decimal::one)
    }

    /// Trading cities in declared order.
    pub fn cities(&self) -> Vec<City> {
        self.routes.iter().map(|e| City::new(e.key)).collect()
    }
}
