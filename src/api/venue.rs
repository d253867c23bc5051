use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::params::QuoteQuery;
use crate::api::AppState;
use crate::domain::{ItemId, TierStat};
use crate::engine::VenueSummary;
use crate::error::AppError;
use crate::orchestration::HistoryReport;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub item_id: ItemId,
    pub summary: VenueSummary,
    pub stats: Vec<TierStat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub item_id: ItemId,
    pub days: u32,
    /// One series per enchant level that answered.
    pub series: Vec<HistoryReport>,
}

pub async fn get_venue(
    Path(item_id): Path<String>,
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<VenueResponse>, AppError> {
    let item = params.item(&item_id)?;
    let report = state.quoter.venue(&item).await?;

    Ok(Json(VenueResponse {
        item_id: item.id,
        summary: report.summary,
        stats: report.stats,
    }))
}

pub async fn get_history(
    Path(item_id): Path<String>,
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let item = params.item(&item_id)?;
    let series = state.quoter.history(&item).await?;

    Ok(Json(HistoryResponse {
        item_id: item.id,
        days: state.quoter.config().history_days,
        series,
    }))
}
