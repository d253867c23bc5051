//! Mock data source for testing without network calls.

use super::{DataSource, DataSourceError};
use crate::domain::{City, HistoryPoint, ItemId, PriceObservation, TierStat};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Mock data source that returns predefined test data.
///
/// Observations and stats are keyed by the fully qualified item id; items
/// registered with [`MockDataSource::with_failure`] fail every call.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    prices: HashMap<ItemId, Vec<PriceObservation>>,
    venue: HashMap<ItemId, Vec<TierStat>>,
    history: HashMap<ItemId, Vec<HistoryPoint>>,
    failing: HashSet<ItemId>,
    fail_all: Option<DataSourceError>,
}

impl MockDataSource {
    /// Create a new mock data source with empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city observation for `item_id`.
    pub fn with_price(mut self, item_id: ItemId, observation: PriceObservation) -> Self {
        let observation = observation.for_item(item_id.clone());
        self.prices.entry(item_id).or_default().push(observation);
        self
    }

    /// Add central venue stats returned for `item_id`.
    pub fn with_venue_stats(mut self, item_id: ItemId, stats: Vec<TierStat>) -> Self {
        self.venue.entry(item_id).or_default().extend(stats);
        self
    }

    /// Add history points returned for `item_id`.
    pub fn with_history(mut self, item_id: ItemId, points: Vec<HistoryPoint>) -> Self {
        self.history.entry(item_id).or_default().extend(points);
        self
    }

    /// Make every call for `item_id` fail with a server error.
    pub fn with_failure(mut self, item_id: ItemId) -> Self {
        self.failing.insert(item_id);
        self
    }

    /// Make every call fail with `error`.
    pub fn failing_with(mut self, error: DataSourceError) -> Self {
        self.fail_all = Some(error);
        self
    }

    fn check(&self, item_id: &ItemId) -> Result<(), DataSourceError> {
        if let Some(err) = &self.fail_all {
            return Err(err.clone());
        }
        if self.failing.contains(item_id) {
            return Err(DataSourceError::HttpError {
                status: 503,
                message: "Server error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_city_prices(
        &self,
        item_ids: &[ItemId],
        cities: &[City],
    ) -> Result<Vec<PriceObservation>, DataSourceError> {
        let mut observations = Vec::new();
        for item_id in item_ids {
            self.check(item_id)?;
            if let Some(stored) = self.prices.get(item_id) {
                observations.extend(stored.iter().filter(|o| cities.contains(&o.city)).cloned());
            }
        }
        Ok(observations)
    }

    async fn fetch_venue_stats(&self, item_id: &ItemId) -> Result<Vec<TierStat>, DataSourceError> {
        self.check(item_id)?;
        Ok(self.venue.get(item_id).cloned().unwrap_or_default())
    }

    async fn fetch_history(
        &self,
        item_id: &ItemId,
        days: u32,
    ) -> Result<Vec<HistoryPoint>, DataSourceError> {
        self.check(item_id)?;
        let mut points = self.history.get(item_id).cloned().unwrap_or_default();
        points.sort_by_key(|p| p.timestamp);
        let skip = points.len().saturating_sub(days as usize);
        Ok(points.split_off(skip))
    }
}
