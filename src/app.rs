//! Bootstrap: configuration -> store open -> router -> serve.
//!
//! Every step logs a lifecycle event; any failure before the serve loop
//! is fatal to the process.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::api::{build_router, AppState};
use crate::config::{Config, ConfigError};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::{JsonStore, StoreError};

/// Fatal boot errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("bind error on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Open the store and assemble the application router.
///
/// Split out of [`serve`] so the router can be built without binding a
/// socket.
pub fn build_app(config: &Config) -> Result<axum::Router, AppError> {
    let store = JsonStore::open(&config.store_uri).map_err(|e| {
        log_event_with_fields(Event::StoreOpenFailed, &[("store_uri", &config.store_uri)]);
        e
    })?;
    log_event_with_fields(Event::StoreOpened, &[("store_uri", &config.store_uri)]);

    let state = Arc::new(AppState::new(Arc::new(store), config.api_key.clone()));
    Ok(build_router(state))
}

/// Run the service until the process is stopped
pub async fn serve(config: Config) -> Result<(), AppError> {
    log_event(Event::BootStart);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.socket_addr()),
            ("store_uri", &config.store_uri),
            (
                "api_key",
                if config.api_key.is_some() { "set" } else { "unset" },
            ),
        ],
    );

    let router = build_app(&config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|source| {
        log_event_with_fields(Event::BindFailed, &[("addr", &addr)]);
        AppError::Bind { addr: addr.clone(), source }
    })?;

    log_event_with_fields(Event::ServeStart, &[("addr", &addr)]);

    axum::serve(listener, router).await.map_err(AppError::Serve)
}
