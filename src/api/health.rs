use axum::Json;

use crate::catalog::Catalog;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the reference catalog is built.
pub async fn ready() -> Json<serde_json::Value> {
    let catalog = Catalog::standard();
    Json(serde_json::json!({
        "status": "ready",
        "cities": catalog.routes.len(),
        "variants": catalog.variants.len(),
    }))
}
