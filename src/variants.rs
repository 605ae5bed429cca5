//! Variant Selection
//!
//! Resolves the variant a shopper has picked on a product page from their option
//! selection.

use rustc_hash::FxHashMap;

use crate::products::{Product, Variant};

/// Selected option values keyed by product option identifier.
pub type OptionSelection = FxHashMap<String, String>;

/// Returns a variant's option values keyed by option identifier.
///
/// Options without a value are left out.
pub fn options_keymap(variant: &Variant<'_>) -> OptionSelection {
    variant
        .options
        .iter()
        .filter_map(|option| {
            option
                .value
                .as_ref()
                .map(|value| (option.option_id.clone(), value.clone()))
        })
        .collect()
}

/// Resolves the variant matching a complete option selection.
///
/// A product with a single variant and no declared options resolves to that variant
/// whatever the selection. Otherwise the selection must equal a variant's option values
/// exactly.
pub fn select_variant<'p, 'a>(
    product: &'p Product<'a>,
    selection: &OptionSelection,
) -> Option<&'p Variant<'a>> {
    if let [only] = product.variants.as_slice()
        && product.options.is_empty()
    {
        return Some(only);
    }

    product
        .variants
        .iter()
        .find(|variant| options_keymap(variant) == *selection)
}

/// Returns true when the selection names an existing variant.
pub fn is_valid_selection(product: &Product<'_>, selection: &OptionSelection) -> bool {
    product
        .variants
        .iter()
        .any(|variant| options_keymap(variant) == *selection)
}

/// Returns the selection a product page starts with.
///
/// Single-variant products start with their only variant selected.
pub fn initial_selection(product: &Product<'_>) -> OptionSelection {
    match product.variants.as_slice() {
        [only] => options_keymap(only),
        _ => OptionSelection::default(),
    }
}

/// Returns true when the variant can be added to a cart.
///
/// Unlike the listing heuristic this checks the stocked quantity of managed inventory.
pub fn is_variant_in_stock(variant: &Variant<'_>) -> bool {
    variant.manage_inventory != Some(true)
        || variant.allow_backorder == Some(true)
        || variant.inventory_quantity.unwrap_or(0) > 0
}
