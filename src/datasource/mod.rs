//! Data source abstraction for fetching market observations from external sources.

use crate::domain::{City, HistoryPoint, ItemId, PriceObservation, TierStat};
use async_trait::async_trait;
use std::fmt;

pub mod albion;
pub mod mock;

pub use albion::AlbionDataSource;
pub use mock::MockDataSource;

/// Data source trait for city order books, central venue statistics and
/// price history.
///
/// Implementations must handle retry/backoff and rate limiting. Absent
/// prices are returned as zeros, never as errors.
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Fetch the latest order-book extremes of one or more items in one call.
    ///
    /// # Arguments
    /// * `item_ids` - Fully qualified item ids (e.g., "T6_2H_BOW@1")
    /// * `cities` - Locations to query
    ///
    /// # Returns
    /// One observation per (item, city) that has data, labelled with its item id
    async fn fetch_city_prices(
        &self,
        item_ids: &[ItemId],
        cities: &[City],
    ) -> Result<Vec<PriceObservation>, DataSourceError>;

    /// Fetch central venue statistics for every tier of one enchant level.
    ///
    /// The enchant level is taken from `item_id`.
    async fn fetch_venue_stats(&self, item_id: &ItemId) -> Result<Vec<TierStat>, DataSourceError>;

    /// Fetch daily central venue history, oldest first.
    ///
    /// # Arguments
    /// * `item_id` - Fully qualified item id
    /// * `days` - Number of most recent daily points wanted
    async fn fetch_history(
        &self,
        item_id: &ItemId,
        days: u32,
    ) -> Result<Vec<HistoryPoint>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Network error (e.g., connection refused, DNS failure)
    NetworkError(String),
    /// Request exceeded the configured timeout
    Timeout,
    /// HTTP error (e.g., 404 unknown item, 5xx server error)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// Rate limit exceeded (caller should implement backoff)
    RateLimited,
    /// Other error
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::Timeout => write!(f, "Request timed out"),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}
