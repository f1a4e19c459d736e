//! Fetch Google Cloud SKU pricing for one region and dump it to JSON

pub mod catalog;
pub mod cli;
pub mod services;
pub mod types;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging to stderr (`RUST_LOG`, default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
