use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::params::{parse_item, TransportParams};
use crate::api::AppState;
use crate::domain::{Decimal, ItemId};
use crate::engine::{classify, CraftingSummary, JournalInfo, ReturnRates};
use crate::error::AppError;
use crate::orchestration::IngredientRequest;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    pub item_id: String,
    pub count: u32,
    /// Looked up at the origin city when absent.
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingRequest {
    pub item_id: String,
    pub name: Option<String>,
    pub weight: Option<Decimal>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    pub output_price: Option<Decimal>,
    #[serde(default)]
    pub return_rates: ReturnRates,
    #[serde(default)]
    pub transport: TransportParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingResponse {
    pub item_id: ItemId,
    pub journal_info: JournalInfo,
    #[serde(flatten)]
    pub summary: CraftingSummary,
}

fn validate_rate(rate: Decimal, field: &str) -> Result<(), AppError> {
    if rate.is_negative() || rate >= Decimal::one() {
        return Err(AppError::BadRequest(format!("{} must be in [0, 1)", field)));
    }
    Ok(())
}

pub async fn post_crafting(
    State(state): State<AppState>,
    Json(request): Json<CraftingRequest>,
) -> Result<Json<CraftingResponse>, AppError> {
    let item = parse_item(
        &request.item_id,
        request.name.as_deref(),
        request.weight,
        request.category.as_deref(),
        request.subcategory.as_deref(),
    )?;
    validate_rate(request.return_rates.base, "returnRates.base")?;
    validate_rate(request.return_rates.bonus, "returnRates.bonus")?;

    let mut ingredients = Vec::with_capacity(request.ingredients.len());
    for line in &request.ingredients {
        let id = line.item_id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("Invalid ingredient item id".to_string()));
        }
        if line.unit_price.is_some_and(|p| p.is_negative()) {
            return Err(AppError::BadRequest(format!("Negative unit price for {}", id)));
        }
        ingredients.push(IngredientRequest {
            item_id: ItemId::new(id),
            count: line.count,
            unit_price: line.unit_price,
        });
    }

    let config = request.transport.to_config();
    let summary = state
        .quoter
        .crafting(
            &item,
            &ingredients,
            request.output_price,
            request.return_rates,
            &config,
        )
        .await?;

    Ok(Json(CraftingResponse {
        journal_info: classify(&item),
        item_id: item.id,
        summary,
    }))
}
