//! # Craftplan
//!
//! Command-line entry point: loads an item and recipe catalog and prints the
//! raw materials each recipe ultimately needs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("craftplan=info".parse()?))
        .init();

    debug!("craftplan {}", env!("CARGO_PKG_VERSION"));

    let options = app::Options::parse();
    app::run(&options)
}
