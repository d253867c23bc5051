pub mod api;
pub mod catalog;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use catalog::Catalog;
pub use config::Config;
pub use datasource::{AlbionDataSource, DataSource, DataSourceError, MockDataSource};
pub use domain::{
    City, ComparisonRow, Decimal, ItemDescriptor, ItemId, PriceObservation, TierStat,
    TransportConfig, VariantKey,
};
pub use error::AppError;
pub use orchestration::Quoter;
