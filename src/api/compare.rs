use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::params::QuoteQuery;
use crate::api::AppState;
use crate::catalog::Catalog;
use crate::domain::{
    pick_best, sort_rows, ComparisonRow, Decimal, ItemDescriptor, ItemId, JournalTreatment,
};
use crate::engine::{classify, resolve_weight, JournalInfo};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub item_id: ItemId,
    pub weight: Decimal,
    pub journal: JournalInfo,
    pub rows: Vec<ComparisonRow>,
    /// Highest net profit, ties resolved by enumeration order.
    pub best: Option<ComparisonRow>,
}

fn respond(
    item: &ItemDescriptor,
    mut rows: Vec<ComparisonRow>,
    query: &QuoteQuery,
) -> Result<Json<ComparisonResponse>, AppError> {
    let (key, direction) = query.ordering()?;
    let best = pick_best(&rows).cloned();
    sort_rows(&mut rows, key, direction);

    Ok(Json(ComparisonResponse {
        item_id: item.id.clone(),
        weight: resolve_weight(item, Catalog::standard()),
        journal: classify(item),
        rows,
        best,
    }))
}

/// Buy the item in each declared city and sell it at the reference price.
///
/// The journal is deducted unless the caller chooses otherwise.
pub async fn get_city_comparison(
    Path(item_id): Path<String>,
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let item = params.item(&item_id)?;
    let config = params.transport()?;
    let journal = params.journal_or(JournalTreatment::Deduct)?;
    let reference_price = params.reference_price()?;
    params.ordering()?;

    let rows = state
        .quoter
        .city_comparison(&item, reference_price, &config, journal)
        .await?;
    respond(&item, rows, &params)
}

/// Buy every tier/enchant variant in the origin city and sell it at the
/// central venue. The journal is credited unless the caller chooses otherwise.
pub async fn get_variant_comparison(
    Path(item_id): Path<String>,
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let item = params.item(&item_id)?;
    let config = params.transport()?;
    let journal = params.journal_or(JournalTreatment::Credit)?;
    params.ordering()?;

    let rows = state
        .quoter
        .variant_comparison(&item, &config, journal)
        .await?;
    respond(&item, rows, &params)
}
