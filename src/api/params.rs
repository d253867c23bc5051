//! Request parameter parsing shared by the item endpoints.

use serde::Deserialize;

use crate::domain::{
    City, Decimal, ItemDescriptor, ItemId, JournalTreatment, SituationalBonuses, SortDirection,
    SortKey, TransportConfig,
};
use crate::error::AppError;

/// Query string accepted by every `/v1/items/:item_id/*` endpoint.
///
/// Decimals arrive as strings so that malformed values map to a JSON 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub qty: Option<u32>,
    pub mount: Option<String>,
    pub bag: Option<String>,
    pub pork_pie: Option<bool>,
    pub lymhurst_bonus: Option<bool>,
    pub avalonian_roads: Option<bool>,
    pub origin: Option<String>,
    pub base_unit_cost: Option<String>,
    pub reference_price: Option<String>,
    pub journal: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub name: Option<String>,
    pub weight: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Transport inputs common to query strings and JSON bodies.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportParams {
    pub qty: Option<u32>,
    pub mount: Option<String>,
    pub bag: Option<String>,
    #[serde(default)]
    pub pork_pie: bool,
    #[serde(default)]
    pub lymhurst_bonus: bool,
    #[serde(default)]
    pub avalonian_roads: bool,
    pub origin: Option<String>,
    pub base_unit_cost: Option<Decimal>,
}

impl TransportParams {
    pub fn to_config(&self) -> TransportConfig {
        let mut config = TransportConfig::default().with_bonuses(SituationalBonuses {
            pork_pie: self.pork_pie,
            lymhurst_bonus: self.lymhurst_bonus,
            avalonian_roads: self.avalonian_roads,
        });
        if let Some(qty) = self.qty {
            config = config.with_quantity(qty);
        }
        if let Some(mount) = non_empty(self.mount.as_deref()) {
            config = config.with_mount(mount);
        }
        if let Some(bag) = non_empty(self.bag.as_deref()) {
            config = config.with_bag(bag);
        }
        if let Some(origin) = non_empty(self.origin.as_deref()) {
            config = config.with_origin(City::new(origin));
        }
        if let Some(cost) = self.base_unit_cost {
            config = config.with_base_unit_cost(cost);
        }
        config
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_decimal(raw: Option<&str>, field: &str) -> Result<Option<Decimal>, AppError> {
    non_empty(raw)
        .map(Decimal::from_str_canonical)
        .transpose()
        .map_err(|_| AppError::BadRequest(format!("Invalid {}", field)))
}

/// Item descriptor from a path id plus optional hints.
pub fn parse_item(
    item_id: &str,
    name: Option<&str>,
    weight: Option<Decimal>,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Result<ItemDescriptor, AppError> {
    let id = item_id.trim();
    if id.is_empty() || id.contains(char::is_whitespace) {
        return Err(AppError::BadRequest("Invalid item id".to_string()));
    }

    let mut item = ItemDescriptor::new(ItemId::new(id));
    if let Some(name) = non_empty(name) {
        item.name = name.to_string();
    }
    if let Some(weight) = weight {
        item = item.with_weight(weight);
    }
    if let Some(category) = non_empty(category) {
        item = item.with_category(category);
    }
    if let Some(subcategory) = non_empty(subcategory) {
        item = item.with_subcategory(subcategory);
    }
    Ok(item)
}

impl QuoteQuery {
    pub fn item(&self, item_id: &str) -> Result<ItemDescriptor, AppError> {
        let weight = parse_decimal(self.weight.as_deref(), "weight")?;
        parse_item(
            item_id,
            self.name.as_deref(),
            weight,
            self.category.as_deref(),
            self.subcategory.as_deref(),
        )
    }

    pub fn transport(&self) -> Result<TransportConfig, AppError> {
        let params = TransportParams {
            qty: self.qty,
            mount: self.mount.clone(),
            bag: self.bag.clone(),
            pork_pie: self.pork_pie.unwrap_or(false),
            lymhurst_bonus: self.lymhurst_bonus.unwrap_or(false),
            avalonian_roads: self.avalonian_roads.unwrap_or(false),
            origin: self.origin.clone(),
            base_unit_cost: parse_decimal(self.base_unit_cost.as_deref(), "baseUnitCost")?,
        };
        Ok(params.to_config())
    }

    pub fn reference_price(&self) -> Result<Option<Decimal>, AppError> {
        parse_decimal(self.reference_price.as_deref(), "referencePrice")
    }

    pub fn journal_or(&self, default: JournalTreatment) -> Result<JournalTreatment, AppError> {
        match non_empty(self.journal.as_deref()) {
            None => Ok(default),
            Some(raw) => JournalTreatment::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid journal: {}", raw))),
        }
    }

    pub fn ordering(&self) -> Result<(SortKey, SortDirection), AppError> {
        let key = match non_empty(self.sort.as_deref()) {
            None => SortKey::default(),
            Some(raw) => SortKey::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid sort key: {}", raw)))?,
        };
        let direction = match non_empty(self.dir.as_deref()) {
            None => SortDirection::default(),
            Some(raw) => SortDirection::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid dir: {}", raw)))?,
        };
        Ok((key, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_defaults() {
        let config = QuoteQuery::default().transport().unwrap();
        assert_eq!(config, TransportConfig::default());
    }

    #[test]
    fn test_transport_from_query() {
        let query = QuoteQuery {
            qty: Some(3),
            mount: Some("T5_Ox".to_string()),
            pork_pie: Some(true),
            origin: Some(" Martlock ".to_string()),
            base_unit_cost: Some("7".to_string()),
            ..Default::default()
        };
        let config = query.transport().unwrap();
        assert_eq!(config.quantity, 3);
        assert_eq!(config.mount, "T5_Ox");
        assert_eq!(config.bag, "None");
        assert!(config.bonuses.pork_pie);
        assert_eq!(config.origin, City::new("Martlock"));
        assert_eq!(config.base_unit_cost, Some(Decimal::from(7u64)));
    }

    #[test]
    fn test_bad_decimal_is_bad_request() {
        let query = QuoteQuery {
            base_unit_cost: Some("five".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.transport(), Err(AppError::BadRequest(_))));

        let query = QuoteQuery {
            reference_price: Some("1e".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.reference_price(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_item_hints() {
        let query = QuoteQuery {
            weight: Some("2.5".to_string()),
            category: Some("Weapon".to_string()),
            ..Default::default()
        };
        let item = query.item("T4_MAIN_SWORD").unwrap();
        assert_eq!(item.weight, Some(Decimal::from_scaled(25, 1)));
        assert_eq!(item.category.as_deref(), Some("Weapon"));
        assert_eq!(item.name, "T4_MAIN_SWORD");

        assert!(matches!(query.item("  "), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_ordering_and_journal() {
        let query = QuoteQuery {
            sort: Some("roi".to_string()),
            dir: Some("asc".to_string()),
            journal: Some("credit".to_string()),
            ..Default::default()
        };
        assert_eq!(query.ordering().unwrap(), (SortKey::Roi, SortDirection::Asc));
        assert_eq!(
            query.journal_or(JournalTreatment::Exclude).unwrap(),
            JournalTreatment::Credit
        );

        let query = QuoteQuery {
            sort: Some("vibes".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.ordering(), Err(AppError::BadRequest(_))));
    }
}
