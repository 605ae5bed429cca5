//! Listing Table
//!
//! Terminal rendering of a listing, one row per tile.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{filters::availability, items::DisplayItem, pricing};

/// Errors writing a listing table.
#[derive(Debug, Error)]
pub enum ListingTableError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes the tiles as a table followed by a tile count.
///
/// # Errors
///
/// Returns a [`ListingTableError`] if the output cannot be written.
pub fn write_to(
    mut out: impl io::Write,
    items: &[DisplayItem<'_>],
) -> Result<(), ListingTableError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Product", "Color", "Variant", "Price", "Stock"]);

    for (idx, item) in items.iter().enumerate() {
        builder.push_record(row(idx, item));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..5), Alignment::right());

    writeln!(out, "{table}")?;
    let noun = if items.len() == 1 { "product" } else { "products" };

    writeln!(out, "{} {noun}", items.len())?;

    Ok(())
}

fn row(idx: usize, item: &DisplayItem<'_>) -> [String; 6] {
    let price = pricing::variant_prices(item.variant()).map_or_else(String::new, |prices| {
        if prices.is_discounted() {
            format!(
                "{} (-{}%)",
                pricing::format_price(&prices.calculated),
                prices.percent_points()
            )
        } else {
            pricing::format_price(&prices.calculated)
        }
    });

    let stock = if availability::has_stock(item.product()) {
        "In stock"
    } else {
        "Out of stock"
    };

    [
        format!("#{:<3}", idx + 1),
        item.product().title.clone(),
        item.color().unwrap_or_default().to_string(),
        item.variant().title.clone(),
        price,
        stock.to_string(),
    ]
}
