//! Item descriptor supplied by the item catalog.

use crate::domain::{Decimal, ItemId};
use serde::{Deserialize, Serialize};

/// Static description of an item. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub name: String,
    /// Official item weight, when the catalog knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    /// Broad kind, e.g. "weapon", "armor", "resource".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Narrower kind, e.g. "plate", "ranged", "fiber".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub craftable: bool,
    #[serde(default)]
    pub refinable: bool,
}

impl ItemDescriptor {
    /// Descriptor carrying only an id; the name defaults to the id.
    pub fn new(id: ItemId) -> Self {
        let name = id.as_str().to_string();
        Self {
            id,
            name,
            weight: None,
            category: None,
            subcategory: None,
            craftable: false,
            refinable: false,
        }
    }

    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Category and subcategory joined with a space, lowercased.
    pub fn kind_text(&self) -> String {
        [self.category.as_deref(), self.subcategory.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
