//! Availability

use crate::{filters::selection::OptionSet, products::Product};

/// Availability option for products with stock.
pub const IN_STOCK: &str = "in-stock";

/// Availability option for products without stock.
pub const OUT_OF_STOCK: &str = "out-of-stock";

/// Returns true when the product counts as in stock for listing purposes.
///
/// Listing queries carry no inventory levels, so a variant counts as stocked when its
/// inventory is unmanaged, it allows backorders, or its inventory is explicitly managed.
/// Only variants with unknown inventory flags count as out of stock.
pub fn has_stock(product: &Product<'_>) -> bool {
    product.variants.iter().any(|variant| {
        variant.manage_inventory == Some(false)
            || variant.allow_backorder == Some(true)
            || variant.manage_inventory == Some(true)
    })
}

/// Applies the availability facet to a product.
///
/// Selecting both options, or only options this facet does not know, places no
/// constraint.
pub fn passes(product: &Product<'_>, options: &OptionSet) -> bool {
    match (options.contains(IN_STOCK), options.contains(OUT_OF_STOCK)) {
        (true, false) => has_stock(product),
        (false, true) => !has_stock(product),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::products::Variant;

    use super::*;

    fn product_with(variant: Variant<'static>) -> Product<'static> {
        Product::new("prod_1", "Tee").with_variant(variant)
    }

    #[test]
    fn unmanaged_inventory_is_in_stock() {
        assert!(has_stock(&product_with(
            Variant::new("v1", "S").with_inventory(false, false)
        )));
    }

    #[test]
    fn backorders_are_in_stock() {
        let mut variant = Variant::new("v1", "S");
        variant.allow_backorder = Some(true);

        assert!(has_stock(&product_with(variant)));
    }

    #[test]
    fn managed_inventory_is_assumed_in_stock() {
        assert!(has_stock(&product_with(
            Variant::new("v1", "S").with_inventory(true, false)
        )));
    }

    #[test]
    fn unknown_flags_are_out_of_stock() {
        assert!(!has_stock(&product_with(Variant::new("v1", "S"))));
        assert!(!has_stock(&Product::new("prod_1", "No variants")));
    }

    #[test]
    fn both_options_selected_pass_everything() {
        let options = OptionSet::from_strs(&[IN_STOCK, OUT_OF_STOCK]);

        assert!(passes(&product_with(Variant::new("v1", "S")), &options));
        assert!(passes(
            &product_with(Variant::new("v1", "S").with_inventory(false, false)),
            &options
        ));
    }

    #[test]
    fn single_option_splits_products() {
        let stocked = product_with(Variant::new("v1", "S").with_inventory(true, false));
        let unknown = product_with(Variant::new("v2", "S"));
        let in_stock = OptionSet::from_strs(&[IN_STOCK]);
        let out_of_stock = OptionSet::from_strs(&[OUT_OF_STOCK]);

        assert!(passes(&stocked, &in_stock));
        assert!(!passes(&unknown, &in_stock));
        assert!(!passes(&stocked, &out_of_stock));
        assert!(passes(&unknown, &out_of_stock));
    }

    #[test]
    fn unrecognized_options_pass_everything() {
        let options = OptionSet::from_strs(&["pre-order"]);

        assert!(passes(&product_with(Variant::new("v1", "S")), &options));
    }
}
