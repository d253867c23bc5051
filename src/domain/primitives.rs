//! Domain primitives: ItemId, City, VariantKey.

use serde::{Deserialize, Serialize};

/// Tier assumed for ids that carry no `T4`..`T8` token.
pub const DEFAULT_TIER: u8 = 4;

/// Canonical item code, optionally tier/enchant-qualified (e.g. "T6_2H_BOW@3").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tier from the first `T4`..`T8` token, if any.
    pub fn tier(&self) -> Option<u8> {
        let bytes = self.0.as_bytes();
        bytes.windows(2).find_map(|pair| match pair {
            [b'T', digit @ b'4'..=b'8'] => Some(digit - b'0'),
            _ => None,
        })
    }

    /// Enchant level from the `@<digit>` suffix; 0 when unqualified.
    pub fn enchant(&self) -> u8 {
        let bytes = self.0.as_bytes();
        bytes
            .windows(2)
            .find_map(|pair| match pair {
                [b'@', digit @ b'0'..=b'9'] => Some(digit - b'0'),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// The id without any `@<digit>` enchant qualifier.
    pub fn base(&self) -> &str {
        match self.0.find('@') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Same item at another enchant level; level 0 is the bare base id.
    pub fn with_enchant(&self, enchant: u8) -> ItemId {
        match enchant {
            0 => ItemId(self.base().to_string()),
            _ => ItemId(format!("{}@{}", self.base(), enchant)),
        }
    }

    /// The variant this id names. Ids without a tier token sit at
    /// [`DEFAULT_TIER`].
    pub fn own_variant(&self) -> VariantKey {
        VariantKey::new(self.tier().unwrap_or(DEFAULT_TIER), self.enchant())
    }

    /// Id of the given variant of this item's base type.
    ///
    /// The tier token is rewritten in place. An id without a tier token has
    /// no other tiers, so only variants at its own tier map to an id.
    pub fn for_variant(&self, variant: VariantKey) -> Option<ItemId> {
        let base = match self.tier() {
            Some(tier) => {
                self.base()
                    .replacen(&format!("T{tier}"), &format!("T{}", variant.tier), 1)
            }
            None if variant.tier == DEFAULT_TIER => self.base().to_string(),
            None => return None,
        };
        Some(ItemId(base).with_enchant(variant.enchant))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trading location name as reported by the market data feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct City(pub String);

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        City(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default origin when a caller does not name one.
    pub fn caerleon() -> Self {
        City::new("Caerleon")
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tier/enchant combination of one item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub tier: u8,
    pub enchant: u8,
}

impl VariantKey {
    pub fn new(tier: u8, enchant: u8) -> Self {
        Self { tier, enchant }
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}.{}", self.tier, self.enchant)
    }
}
