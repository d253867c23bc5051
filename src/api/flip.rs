use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::params::QuoteQuery;
use crate::api::AppState;
use crate::domain::{Decimal, ItemId};
use crate::engine::FlipSummary;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipResponse {
    pub item_id: ItemId,
    pub sales_tax_rate: Decimal,
    #[serde(flatten)]
    pub summary: FlipSummary,
}

pub async fn get_flip(
    Path(item_id): Path<String>,
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<FlipResponse>, AppError> {
    let item = params.item(&item_id)?;
    let config = params.transport()?;

    let summary = state.quoter.flip(&item, &config).await?;

    Ok(Json(FlipResponse {
        item_id: item.id,
        sales_tax_rate: state.quoter.config().sales_tax_rate,
        summary,
    }))
}
