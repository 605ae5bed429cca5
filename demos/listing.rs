//! Listing Example
//!
//! This example renders a fixture-backed product listing as a table.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to pick a sort key
//! Use `--filter facet=option` (repeatable) to narrow the listing
//! Use `RUST_LOG=lookbook=debug` to see pipeline stage counts

use std::io;

use anyhow::Result;

use clap::Parser;
use lookbook::{
    fixtures::Fixture,
    listing::{Listing, table::write_to},
    utils::{ListingArgs, LogFormat},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(args: &ListingArgs) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_err| EnvFilter::new(args.log_level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);

    match args.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// Listing Example
pub fn main() -> Result<()> {
    let args = ListingArgs::parse();

    init_logging(&args)?;

    let fixture = Fixture::from_set(&args.fixture)?;
    let query = args.query()?;

    let currency_code = match args.currency.as_deref() {
        Some(code) => code.to_string(),
        None => fixture.currency()?.iso_alpha_code.to_string(),
    };

    let listing = Listing::new(fixture.products(), currency_code, fixture.ranking());
    let items = listing.items(&query);

    let stdout = io::stdout();
    let handle = stdout.lock();

    write_to(handle, &items)?;

    Ok(())
}
