pub mod catalog;
pub mod compare;
pub mod crafting;
pub mod flip;
pub mod health;
pub mod params;
pub mod venue;

use crate::config::Config;
use crate::datasource::DataSource;
use crate::orchestration::Quoter;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub quoter: Arc<Quoter>,
}

impl AppState {
    pub fn new(datasource: Arc<dyn DataSource>, config: Config) -> Self {
        Self {
            quoter: Arc::new(Quoter::new(datasource, config)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/catalog", get(catalog::get_catalog))
        .route(
            "/v1/items/:item_id/cities",
            get(compare::get_city_comparison),
        )
        .route(
            "/v1/items/:item_id/variants",
            get(compare::get_variant_comparison),
        )
        .route("/v1/items/:item_id/flip", get(flip::get_flip))
        .route("/v1/items/:item_id/venue", get(venue::get_venue))
        .route("/v1/items/:item_id/history", get(venue::get_history))
        .route("/v1/crafting", post(crafting::post_crafting))
        .layer(cors)
        .with_state(state)
}
