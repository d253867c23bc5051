//! Pure computation engine for profit evaluation.
//!
//! Nothing in here performs I/O or holds mutable state; every function is a
//! deterministic function of its arguments and the read-only [`Catalog`].
//!
//! [`Catalog`]: crate::catalog::Catalog

use crate::domain::Decimal;

pub mod carry;
pub mod comparison;
pub mod crafting;
pub mod flip;
pub mod journal;
pub mod return_rate;
pub mod transport;
pub mod venue;
pub mod weight;

pub use carry::{effective_carry_multiplier, total_carry_multiplier};
pub use comparison::{build_city_comparison, build_variant_comparison};
pub use crafting::{evaluate_crafting, CraftingSummary, IngredientLine, ReturnRates};
pub use flip::{evaluate_flip, FlipSummary};
pub use journal::{classify, JournalInfo};
pub use return_rate::{apply_return_rate, combine_return_rates};
pub use transport::TransportModel;
pub use venue::{summarize_history, summarize_venue, HistorySummary, VenueSummary};
pub use weight::resolve_weight;

/// `profit / outlay` as a percentage with one decimal; 0 when nothing was spent.
pub fn roi_percent(profit: Decimal, outlay: Decimal) -> Decimal {
    if !outlay.is_positive() {
        return Decimal::zero();
    }
    profit
        .checked_div(outlay)
        .map(|ratio| (ratio * Decimal::hundred()).round_tenths())
        .unwrap_or_else(Decimal::zero)
}

/// Profit per unit of weight with one decimal; 0 for a non-positive weight.
pub fn profit_per_weight(profit: Decimal, weight: Decimal) -> Decimal {
    if !weight.is_positive() {
        return Decimal::zero();
    }
    profit
        .checked_div(weight)
        .map(|ppw| ppw.round_tenths())
        .unwrap_or_else(Decimal::zero)
}
