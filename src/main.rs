//! Shop API entry point.
//!
//! Minimal by design: parse arguments and delegate to cli::run, print the
//! error, exit non-zero on failure. Configuration loading, store setup,
//! and the serve loop all live behind the CLI module.

use shop_api::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
