//! Colors

use smallvec::SmallVec;

use crate::products::Product;

/// Color values shown under a different name, keyed by lower-cased catalog value.
const COLOR_ALIASES: [(&str, &str); 1] = [("beige", "Sand")];

/// Returns the label a catalog color value is listed under.
///
/// Aliased colors take their alias; every other value keeps its catalog casing.
pub fn display_color(value: &str) -> String {
    let folded = value.to_lowercase();

    COLOR_ALIASES
        .iter()
        .find(|(from, _)| *from == folded)
        .map_or_else(|| value.to_string(), |(_, to)| (*to).to_string())
}

/// Returns true when a filter color selects an item color.
///
/// Matching is case-insensitive and symmetric on substrings, so "muted olive" matches
/// "olive" and "olive" matches "muted olive". Short names can match more than intended.
pub fn matches(item_color: &str, filter_color: &str) -> bool {
    let item = item_color.to_lowercase();
    let filter = filter_color.to_lowercase();

    item == filter || item.contains(&filter) || filter.contains(&item)
}

/// Collects the distinct colors of a product list as lower-cased filter values, sorted.
pub fn distinct_colors(products: &[Product<'_>]) -> SmallVec<[String; 8]> {
    let mut colors: SmallVec<[String; 8]> = products
        .iter()
        .flat_map(|product| product.variants.iter())
        .filter_map(|variant| variant.color())
        .map(|value| display_color(value).to_lowercase())
        .collect();

    colors.sort();
    colors.dedup();

    colors
}

/// Capitalizes the first character of a filter value for display.
pub fn label(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
