//! Heuristic journal classification.
//!
//! Rules are evaluated top to bottom and the first match wins. The order is
//! observable in profit figures and is pinned by the tests below.

use crate::domain::{Decimal, ItemDescriptor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalInfo {
    pub archetype: &'static str,
    pub baseline_value: Decimal,
}

struct JournalRule {
    /// Matched against the uppercased item id.
    id_tokens: &'static [&'static str],
    /// Matched against the lowercased category/subcategory text.
    kind_tokens: &'static [&'static str],
    archetype: &'static str,
    value: u64,
}

impl JournalRule {
    fn matches(&self, id: &str, kind: &str) -> bool {
        self.id_tokens.iter().any(|t| id.contains(t))
            || self.kind_tokens.iter().any(|t| kind.contains(t))
    }
}

const RULES: &[JournalRule] = &[
    JournalRule {
        id_tokens: &["SWORD"],
        kind_tokens: &["weapon"],
        archetype: "Warrior",
        value: 4500,
    },
    JournalRule {
        id_tokens: &["BOW"],
        kind_tokens: &["ranged"],
        archetype: "Ranger",
        value: 4200,
    },
    JournalRule {
        id_tokens: &["ROBE"],
        kind_tokens: &["cloth", "magic"],
        archetype: "Mage",
        value: 4300,
    },
    JournalRule {
        id_tokens: &["PLATE", "ARMOR"],
        kind_tokens: &[],
        archetype: "Blacksmith",
        value: 4800,
    },
    JournalRule {
        id_tokens: &["ORE", "WOOD", "FIBER"],
        kind_tokens: &["resource"],
        archetype: "Gatherer",
        value: 2000,
    },
];

const FALLBACK_ARCHETYPE: &str = "General";
const FALLBACK_VALUE: u64 = 1500;

/// Journal archetype and its approximate silver value for `item`.
pub fn classify(item: &ItemDescriptor) -> JournalInfo {
    let id = item.id.as_str().to_uppercase();
    let kind = item.kind_text();

    let (archetype, value) = RULES
        .iter()
        .find(|rule| rule.matches(&id, &kind))
        .map(|rule| (rule.archetype, rule.value))
        .unwrap_or((FALLBACK_ARCHETYPE, FALLBACK_VALUE));

    JournalInfo {
        archetype,
        baseline_value: Decimal::from(value),
    }
}
