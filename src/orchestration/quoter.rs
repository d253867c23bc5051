use crate::catalog::Catalog;
use crate::config::Config;
use crate::datasource::{DataSource, DataSourceError};
use crate::domain::{
    City, ComparisonRow, Decimal, HistoryPoint, ItemDescriptor, ItemId, JournalTreatment,
    PriceObservation, TierStat, TransportConfig, VariantKey,
};
use crate::engine::{
    build_city_comparison, build_variant_comparison, evaluate_crafting, evaluate_flip,
    summarize_history, summarize_venue, CraftingSummary, FlipSummary, HistorySummary,
    IngredientLine, ReturnRates, TransportModel, VenueSummary,
};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const ENCHANT_LEVELS: std::ops::RangeInclusive<u8> = 0..=4;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Market data unavailable: {0}")]
    DataSource(#[from] DataSourceError),
}

/// Recipe line as requested: the unit price is looked up when absent.
#[derive(Debug, Clone)]
pub struct IngredientRequest {
    pub item_id: ItemId,
    pub count: u32,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct VenueReport {
    pub summary: VenueSummary,
    pub stats: Vec<TierStat>,
}

/// Daily history of one enchant level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub enchant: u8,
    pub item_id: ItemId,
    pub points: Vec<HistoryPoint>,
    pub summary: HistorySummary,
}

/// Fetches market data for a request and hands it to the engine.
///
/// Holds no state between requests; every quote is rebuilt from fresh data.
#[derive(Clone)]
pub struct Quoter {
    datasource: Arc<dyn DataSource>,
    config: Config,
}

impl Quoter {
    pub fn new(datasource: Arc<dyn DataSource>, config: Config) -> Self {
        Self { datasource, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model(&self) -> TransportModel<'static> {
        TransportModel::new(Catalog::standard(), self.config.base_silver_per_weight)
    }

    /// Buy in every declared city, sell at `reference_price` or, when absent,
    /// at the highest central venue sell price reported for the item.
    pub async fn city_comparison(
        &self,
        item: &ItemDescriptor,
        reference_price: Option<Decimal>,
        config: &TransportConfig,
        journal: JournalTreatment,
    ) -> Result<Vec<ComparisonRow>, QuoteError> {
        let cities = Catalog::standard().cities();
        let observations = self
            .datasource
            .fetch_city_prices(std::slice::from_ref(&item.id), &cities)
            .await?;

        let reference_price = match reference_price {
            Some(price) => price,
            None => {
                let stats = self.datasource.fetch_venue_stats(&item.id).await?;
                stats
                    .iter()
                    .map(|s| s.sell_price)
                    .max()
                    .unwrap_or_default()
            }
        };

        debug!(
            "City comparison for item={} with {} observations, reference={}",
            item.id,
            observations.len(),
            reference_price
        );
        Ok(build_city_comparison(
            item,
            &observations,
            reference_price,
            config,
            journal,
            &self.model(),
        ))
    }

    /// Every tier/enchant variant bought in the origin city and sold at the
    /// central venue.
    ///
    /// Fans out one venue request and one price request per enchant level.
    /// Failed levels are skipped; the call fails only when all of them do.
    pub async fn variant_comparison(
        &self,
        item: &ItemDescriptor,
        config: &TransportConfig,
        journal: JournalTreatment,
    ) -> Result<Vec<ComparisonRow>, QuoteError> {
        let origin = std::slice::from_ref(&config.origin);
        // Variants are declared tier-major.
        let mut tiers: Vec<u8> = Catalog::standard().variants.iter().map(|v| v.tier).collect();
        tiers.dedup();
        let venue_tier = item.id.own_variant().tier;

        let requests = ENCHANT_LEVELS.map(|enchant| {
            let venue_id = item.id.for_variant(VariantKey::new(venue_tier, enchant));
            let price_ids: Vec<ItemId> = tiers
                .iter()
                .filter_map(|&tier| item.id.for_variant(VariantKey::new(tier, enchant)))
                .collect();
            async move {
                let stats = match venue_id {
                    Some(id) => self.datasource.fetch_venue_stats(&id).await?,
                    None => Vec::new(),
                };
                let observations = self.datasource.fetch_city_prices(&price_ids, origin).await?;
                Ok::<_, DataSourceError>((stats, observations))
            }
        });

        let mut stats = Vec::new();
        let mut observations = Vec::new();
        for (level_stats, level_observations) in merge_levels(join_all(requests).await)? {
            stats.extend(level_stats);
            observations.extend(level_observations);
        }
        info!(
            "Variant comparison for item={}: {} venue stats, {} observations",
            item.id,
            stats.len(),
            observations.len()
        );
        Ok(build_variant_comparison(
            item,
            &stats,
            &observations,
            config,
            journal,
            &self.model(),
        ))
    }

    /// Best buy order against best sell order across all declared cities.
    pub async fn flip(
        &self,
        item: &ItemDescriptor,
        config: &TransportConfig,
    ) -> Result<FlipSummary, QuoteError> {
        let cities = Catalog::standard().cities();
        let observations = self
            .datasource
            .fetch_city_prices(std::slice::from_ref(&item.id), &cities)
            .await?;
        Ok(evaluate_flip(
            item,
            &observations,
            config,
            self.config.sales_tax_rate,
            &self.model(),
        ))
    }

    /// Central venue snapshot over every enchant level of the item.
    pub async fn venue(&self, item: &ItemDescriptor) -> Result<VenueReport, QuoteError> {
        let requests = ENCHANT_LEVELS.map(|enchant| {
            let id = item.id.with_enchant(enchant);
            async move { self.datasource.fetch_venue_stats(&id).await }
        });

        let mut stats: Vec<TierStat> = merge_levels(join_all(requests).await)?
            .into_iter()
            .flatten()
            .collect();
        stats.sort_by_key(|s| s.variant);
        Ok(VenueReport {
            summary: summarize_venue(&stats),
            stats,
        })
    }

    /// Daily central venue history over the configured window, one series
    /// per enchant level. Failed levels are left out.
    pub async fn history(&self, item: &ItemDescriptor) -> Result<Vec<HistoryReport>, QuoteError> {
        let days = self.config.history_days;
        let requests = ENCHANT_LEVELS.map(|enchant| {
            let id = item.id.with_enchant(enchant);
            async move {
                let points = self.datasource.fetch_history(&id, days).await?;
                Ok::<_, DataSourceError>(HistoryReport {
                    enchant,
                    summary: summarize_history(&points, days as usize),
                    item_id: id,
                    points,
                })
            }
        });

        let series = merge_levels(join_all(requests).await)?;
        debug!("History for item={}: {} enchant series", item.id, series.len());
        Ok(series)
    }

    /// Crafting or refining a batch in the origin city.
    ///
    /// Ingredient prices default to the origin's best buy order, the output
    /// price to its lowest sell order.
    pub async fn crafting(
        &self,
        item: &ItemDescriptor,
        ingredients: &[IngredientRequest],
        output_price: Option<Decimal>,
        rates: ReturnRates,
        config: &TransportConfig,
    ) -> Result<CraftingSummary, QuoteError> {
        let mut wanted: Vec<ItemId> = ingredients
            .iter()
            .filter(|line| line.unit_price.is_none())
            .map(|line| line.item_id.clone())
            .collect();
        if output_price.is_none() {
            wanted.push(item.id.clone());
        }

        let observations = if wanted.is_empty() {
            Vec::new()
        } else {
            self.datasource
                .fetch_city_prices(&wanted, std::slice::from_ref(&config.origin))
                .await?
        };
        let lookup = |id: &ItemId| latest_for(&observations, id, &config.origin);

        let lines: Vec<IngredientLine> = ingredients
            .iter()
            .map(|line| IngredientLine {
                item_id: line.item_id.clone(),
                count: line.count,
                unit_price: line.unit_price.unwrap_or_else(|| {
                    lookup(&line.item_id)
                        .map(|o| o.buy_price_max)
                        .unwrap_or_default()
                }),
            })
            .collect();
        let output_price = output_price
            .unwrap_or_else(|| lookup(&item.id).map(|o| o.sell_price_min).unwrap_or_default());

        Ok(evaluate_crafting(
            item,
            &lines,
            output_price,
            rates,
            config,
            &self.model(),
        ))
    }
}

fn latest_for<'a>(
    observations: &'a [PriceObservation],
    id: &ItemId,
    city: &City,
) -> Option<&'a PriceObservation> {
    observations
        .iter()
        .rev()
        .find(|o| &o.city == city && o.item_id.as_ref() == Some(id))
}

/// Keep the successful per-enchant results in enchant order, skipping failed
/// levels. Fails only when every level failed.
fn merge_levels<T>(results: Vec<Result<T, DataSourceError>>) -> Result<Vec<T>, QuoteError> {
    let mut merged = Vec::with_capacity(results.len());
    let mut first_error = None;

    for (enchant, result) in results.into_iter().enumerate() {
        match result {
            Ok(level) => merged.push(level),
            Err(e) => {
                warn!("Skipping enchant level {}: {}", enchant, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if merged.is_empty() => Err(QuoteError::DataSource(e)),
        _ => Ok(merged),
    }
}
