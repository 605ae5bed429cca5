//! Filters
//!
//! Facet filtering for listing pages. Facets combine with AND; options within a facet
//! combine with OR; a facet with nothing selected is ignored.

use std::{fmt, str::FromStr};

use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{
    filters::{price::PriceBucket, selection::OptionSet},
    items::{DisplayItem, colors},
    products::Product,
};

pub mod availability;
pub mod price;
pub mod selection;

/// Errors parsing facet selections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FacetError {
    /// The facet identifier is not one of `availability`, `price` or `color`.
    #[error("unknown facet: {0}")]
    UnknownFacet(String),

    /// A selection pair was not written as `facet=option`.
    #[error("expected facet=option, got: {0}")]
    MalformedPair(String),
}

/// One independent filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    /// In stock / out of stock
    Availability,

    /// Price bucket
    Price,

    /// Color
    Color,
}

impl Facet {
    /// All facets in filter-bar order.
    pub const ALL: [Facet; 3] = [Facet::Availability, Facet::Price, Facet::Color];

    /// Identifier used in selections and URLs.
    pub fn id(self) -> &'static str {
        match self {
            Facet::Availability => "availability",
            Facet::Price => "price",
            Facet::Color => "color",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Availability => "Availability",
            Facet::Price => "Price",
            Facet::Color => "Color",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Facet {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| FacetError::UnknownFacet(s.to_string()))
    }
}

/// Filters display items by the active facet selections.
///
/// Returns the passing items in input order; the input is left untouched.
pub fn filter<'a>(
    items: &[DisplayItem<'a>],
    selection: &selection::FilterSelection,
    price_buckets: &[PriceBucket],
) -> Vec<DisplayItem<'a>> {
    let availability = selection.active(Facet::Availability);
    let price = selection.active(Facet::Price);
    let color = selection.active(Facet::Color);

    items
        .iter()
        .filter(|item| {
            availability.is_none_or(|options| availability::passes(item.product(), options))
        })
        .filter(|item| price.is_none_or(|options| passes_price(item, options, price_buckets)))
        .filter(|item| color.is_none_or(|options| passes_color(item, options)))
        .cloned()
        .collect()
}

/// Applies the price facet to an item.
///
/// A selected identifier that names no bucket places no constraint.
fn passes_price(
    item: &DisplayItem<'_>,
    options: &OptionSet,
    price_buckets: &[PriceBucket],
) -> bool {
    let amount = item.amount();

    options.iter().any(|id| {
        price_buckets
            .iter()
            .find(|bucket| bucket.id == id)
            .is_none_or(|bucket| bucket.contains(amount))
    })
}

/// Applies the color facet to an item; colorless items never pass.
fn passes_color(item: &DisplayItem<'_>, options: &OptionSet) -> bool {
    item.color()
        .is_some_and(|color| options.iter().any(|filter| colors::matches(color, filter)))
}

/// A selectable option in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Identifier placed in the selection
    pub id: String,

    /// Display label
    pub label: String,
}

impl FilterOption {
    fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A facet and its selectable options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    /// Facet this group filters on
    pub facet: Facet,

    /// Options in display order
    pub options: SmallVec<[FilterOption; 8]>,
}

impl FilterGroup {
    /// Display label of the group.
    pub fn label(&self) -> &'static str {
        self.facet.label()
    }
}

/// Builds the filter bar for a product list.
///
/// Price options come from the currency's bucket table; color options are the distinct
/// colors of the listed products.
pub fn facet_groups(products: &[Product<'_>], currency_code: &str) -> SmallVec<[FilterGroup; 3]> {
    let availability = FilterGroup {
        facet: Facet::Availability,
        options: smallvec![
            FilterOption::new(availability::IN_STOCK, "In Stock"),
            FilterOption::new(availability::OUT_OF_STOCK, "Out of Stock"),
        ],
    };

    let price = FilterGroup {
        facet: Facet::Price,
        options: price::price_buckets(currency_code)
            .into_iter()
            .map(|bucket| FilterOption::new(bucket.id, bucket.label))
            .collect(),
    };

    let color = FilterGroup {
        facet: Facet::Color,
        options: colors::distinct_colors(products)
            .into_iter()
            .map(|value| {
                let label = colors::label(&value);
                FilterOption::new(value, label)
            })
            .collect(),
    };

    smallvec![availability, price, color]
}
