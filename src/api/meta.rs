//! Service metadata endpoints and the explicit 404 fallback.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Root-level routes (`/` and `/version`)
pub fn meta_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_description))
        .route("/version", get(version))
}

async fn service_description() -> Json<Value> {
    Json(json!({
        "service": "Shop API",
        "description": "Document-backed REST service for products and items",
        "endpoints": {
            "products": "/api/products",
            "items": "/api/items",
            "version": "/version",
        },
    }))
}

async fn version(State(state): State<Arc<AppState>>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        updated_at: state.started_at.to_rfc3339(),
    })
}

/// Terminal case for requests no route matched. Registered explicitly as
/// the router fallback rather than relying on route ordering.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "API endpoint not found"})),
    )
}
