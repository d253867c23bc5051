pub mod quoter;

pub use quoter::{HistoryReport, IngredientRequest, QuoteError, Quoter, VenueReport};
