use axum::Json;

use crate::catalog::Catalog;

/// Static reference tables: equipment, routes, weights, bonuses and the
/// declared candidate sets.
pub async fn get_catalog() -> Json<&'static Catalog> {
    Json(Catalog::standard())
}
