//! Utils

use clap::{Parser, ValueEnum};

use crate::{
    filters::{FacetError, selection::FilterSelection},
    listing::ListingQuery,
    sorting::SortKey,
};

/// Log output format for the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line logs
    Compact,

    /// Structured JSON logs
    Json,
}

/// Arguments for the listing demo
#[derive(Debug, Parser)]
pub struct ListingArgs {
    /// Fixture set to list
    #[arg(short, long, default_value = "apparel")]
    pub fixture: String,

    /// Currency code for price buckets; defaults to the fixture's currency
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Sort key (featured, newest, price-asc, price-desc, title-asc)
    #[arg(short, long, default_value_t = SortKey::Featured)]
    pub sort: SortKey,

    /// Facet filter as `facet=option`; repeat to select more options
    #[arg(long = "filter", value_name = "FACET=OPTION")]
    pub filters: Vec<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl ListingArgs {
    /// Builds the listing query from the sort key and filters.
    ///
    /// # Errors
    ///
    /// Returns a [`FacetError`] if a filter names an unknown facet or is not a
    /// `facet=option` pair.
    pub fn query(&self) -> Result<ListingQuery, FacetError> {
        let mut selection = FilterSelection::new();

        for pair in &self.filters {
            selection.select_pair(pair)?;
        }

        Ok(ListingQuery::new()
            .with_selection(selection)
            .with_sort(self.sort))
    }
}
