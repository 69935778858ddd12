//! Command-line interface.
//!
//! One command: serve. Flags override the corresponding environment
//! variables; environment loading itself lives in [`crate::config`].

use clap::Parser;

use crate::app::{self, AppError};
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};

/// Shop API - a document-backed REST service for products and items
#[derive(Parser, Debug)]
#[command(name = "shop-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data directory of the document store (overrides SHOP_STORE_URI)
    #[arg(long)]
    pub store_uri: Option<String>,

    /// Host to bind to (overrides SHOP_HTTP_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides SHOP_HTTP_PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Resolve the effective configuration: flags win over environment
    pub fn resolve_config(&self) -> Result<Config, crate::config::ConfigError> {
        use crate::config::{ENV_HTTP_HOST, ENV_HTTP_PORT, ENV_STORE_URI};

        Config::from_lookup(|key| {
            let flag = match key {
                ENV_STORE_URI => self.store_uri.clone(),
                ENV_HTTP_HOST => self.host.clone(),
                ENV_HTTP_PORT => self.port.map(|p| p.to_string()),
                _ => None,
            };
            flag.or_else(|| std::env::var(key).ok())
        })
    }
}

/// Parse arguments, resolve configuration, and run the server
pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = cli.resolve_config().map_err(|e| {
        log_event_with_fields(Event::ConfigInvalid, &[("reason", &e.to_string())]);
        e
    })?;

    app::serve(config).await
}
