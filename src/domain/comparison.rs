//! Comparison row produced per candidate by the ranking engine.

use crate::domain::{City, Decimal, VariantKey};
use serde::{Deserialize, Serialize};

/// Which candidate a row describes.
///
/// Ordering is by kind, then city name or (tier, enchant).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CandidateKey {
    City { city: City },
    Variant { tier: u8, enchant: u8 },
}

impl CandidateKey {
    pub fn city(city: City) -> Self {
        CandidateKey::City { city }
    }

    pub fn variant(variant: VariantKey) -> Self {
        CandidateKey::Variant {
            tier: variant.tier,
            enchant: variant.enchant,
        }
    }
}

impl std::fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateKey::City { city } => write!(f, "{}", city),
            CandidateKey::Variant { tier, enchant } => write!(f, "T{}.{}", tier, enchant),
        }
    }
}

/// Venue order-flow figures carried on variant rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueActivity {
    pub volume: u64,
    pub fill_time: Decimal,
    pub demand: u8,
}

/// Derived profitability figures for one candidate.
///
/// Rows are rebuilt from inputs on every request and never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub key: CandidateKey,
    /// What the candidate market asks (its lowest sell order).
    pub sell_price: Decimal,
    /// Acquisition price per unit.
    pub buy_price: Decimal,
    /// Resale price per unit at the destination.
    pub reference_price: Decimal,
    pub transport_cost: u64,
    pub bonus_value: Decimal,
    pub net_profit: Decimal,
    /// Percent, one decimal.
    pub roi: Decimal,
    /// Profit per unit of item weight, one decimal.
    pub ppw: Decimal,
    pub route_multiplier: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<VenueActivity>,
}

/// How the journal bonus enters net profit for a calling context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalTreatment {
    /// Reported on the row but not part of net profit.
    #[default]
    Exclude,
    /// Subtracted, e.g. the cost of filling a journal on the way.
    Deduct,
    /// Added, e.g. a filled journal sold alongside the item.
    Credit,
}

impl JournalTreatment {
    /// Signed contribution of `bonus` to net profit.
    pub fn apply(&self, bonus: Decimal) -> Decimal {
        match self {
            JournalTreatment::Exclude => Decimal::zero(),
            JournalTreatment::Deduct => -bonus,
            JournalTreatment::Credit => bonus,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclude" | "none" => Some(JournalTreatment::Exclude),
            "deduct" => Some(JournalTreatment::Deduct),
            "credit" => Some(JournalTreatment::Credit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_key_serialization() {
        let key = CandidateKey::city(City::new("Martlock"));
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"kind":"city","city":"Martlock"}"#);

        let key = CandidateKey::variant(VariantKey::new(6, 1));
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"kind":"variant","tier":6,"enchant":1}"#);
    }

    #[test]
    fn test_candidate_key_display() {
        assert_eq!(CandidateKey::city(City::new("Thetford")).to_string(), "Thetford");
        assert_eq!(
            CandidateKey::variant(VariantKey::new(8, 3)).to_string(),
            "T8.3"
        );
    }

    #[test]
    fn test_journal_treatment_apply() {
        let bonus = Decimal::from(4500u64);
        assert_eq!(JournalTreatment::Exclude.apply(bonus), Decimal::zero());
        assert_eq!(JournalTreatment::Deduct.apply(bonus), -bonus);
        assert_eq!(JournalTreatment::Credit.apply(bonus), bonus);
    }

    #[test]
    fn test_journal_treatment_parse() {
        assert_eq!(JournalTreatment::parse("Credit"), Some(JournalTreatment::Credit));
        assert_eq!(JournalTreatment::parse("none"), Some(JournalTreatment::Exclude));
        assert_eq!(JournalTreatment::parse("bogus"), None);
    }
}
