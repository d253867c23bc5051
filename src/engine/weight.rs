use crate::catalog::Catalog;
use crate::domain::{Decimal, ItemDescriptor};

/// Weight of one unit of `item`, always > 0.
///
/// An explicit positive weight wins. Otherwise the catalog's fallback rules
/// are scanned in declared order and the first token found in the uppercased
/// id or category/subcategory decides, even if a later token also matches.
/// Items matching nothing get the catalog default.
pub fn resolve_weight(item: &ItemDescriptor, catalog: &Catalog) -> Decimal {
    if let Some(weight) = item.weight.filter(Decimal::is_positive) {
        return weight;
    }

    let id = item.id.as_str().to_uppercase();
    let kind = item.kind_text().to_uppercase();

    catalog
        .weight_fallbacks
        .iter()
        .find(|rule| id.contains(rule.token) || kind.contains(rule.token))
        .map(|rule| rule.weight)
        .unwrap_or(catalog.default_weight)
}
