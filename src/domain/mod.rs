//! Domain types and determinism layer for the market profit engine.
//!
//! This module provides:
//! - Exact numeric handling via the Decimal wrapper
//! - Domain primitives: ItemId, City, VariantKey
//! - Inputs: item descriptors, price observations, venue tier stats, transport config
//! - Outputs: comparison rows and their stable ordering

pub mod comparison;
pub mod decimal;
pub mod item;
pub mod market;
pub mod ordering;
pub mod primitives;
pub mod transport;

pub use comparison::{CandidateKey, ComparisonRow, JournalTreatment, VenueActivity};
pub use decimal::Decimal;
pub use item::ItemDescriptor;
pub use market::{HistoryPoint, PriceObservation, TierStat};
pub use ordering::{pick_best, sort_rows, SortDirection, SortKey};
pub use primitives::{City, ItemId, VariantKey};
pub use transport::{SituationalBonuses, TransportConfig};
