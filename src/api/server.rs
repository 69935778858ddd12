//! Router assembly and shared request state.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::items::item_routes;
use super::meta::{meta_routes, not_found};
use super::products::product_routes;
use crate::store::DocumentStore;

/// State shared by every handler: the injected store handle, the
/// configured shared secret, and the boot timestamp. Constructed once at
/// startup and never reassigned.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub api_key: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, api_key: Option<String>) -> Self {
        Self {
            store,
            api_key,
            started_at: Utc::now(),
        }
    }
}

/// Build the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(meta_routes())
        .nest("/api", product_routes().merge(item_routes()))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;

    #[test]
    fn test_router_builds() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::open(dir.path()).unwrap());
        let state = Arc::new(AppState::new(store, Some("secret".to_string())));
        let _router = build_router(state);
    }
}
