//! Items
//!
//! Expands catalog products into display items: one grid tile per distinct color of a
//! product.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::products::{Product, Variant};

pub mod colors;

/// One listing tile: a product shown through a representative variant.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem<'a> {
    product: &'a Product<'a>,
    variant: &'a Variant<'a>,
    color: Option<String>,
}

impl<'a> DisplayItem<'a> {
    /// Creates a display item.
    pub fn new(product: &'a Product<'a>, variant: &'a Variant<'a>, color: Option<String>) -> Self {
        Self {
            product,
            variant,
            color,
        }
    }

    /// Returns the product this tile shows.
    pub fn product(&self) -> &'a Product<'a> {
        self.product
    }

    /// Returns the representative variant.
    pub fn variant(&self) -> &'a Variant<'a> {
        self.variant
    }

    /// Returns the resolved color label, if the product has colors.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the representative variant's listing price.
    pub fn price(&self) -> Option<&'a Money<'a, Currency>> {
        self.variant.listing_price()
    }

    /// Returns the listing price amount; `None` stands for an infinite price.
    pub fn amount(&self) -> Option<Decimal> {
        self.price().map(|money| *money.amount())
    }
}

/// Expands products into display items.
///
/// Each product yields one item per distinct color (case-insensitive, first variant
/// seen wins) in variant order. Products without any colored variant yield a single
/// colorless item for their first variant, and products without variants yield nothing.
pub fn expand<'a>(products: &'a [Product<'a>]) -> Vec<DisplayItem<'a>> {
    let mut items = Vec::with_capacity(products.len());

    for product in products {
        items.extend(expand_product(product));
    }

    items
}

/// Expands a single product into its display items.
pub fn expand_product<'a>(product: &'a Product<'a>) -> SmallVec<[DisplayItem<'a>; 4]> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut items: SmallVec<[DisplayItem<'a>; 4]> = SmallVec::new();

    for variant in &product.variants {
        let Some(color) = variant.color().map(colors::display_color) else {
            continue;
        };

        if seen.insert(color.to_lowercase()) {
            items.push(DisplayItem::new(product, variant, Some(color)));
        }
    }

    if items.is_empty()
        && let Some(first) = product.first_variant()
    {
        items.push(DisplayItem::new(product, first, None));
    }

    items
}
