//! Pricing
//!
//! Price resolution for product tiles and product detail pages.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::products::{Product, Variant};

/// Price type reported when no price list produced the calculated price.
pub const DEFAULT_PRICE_TYPE: &str = "default";

/// Looks up a supported currency by ISO code, ignoring case.
pub fn currency_for_code(code: &str) -> Option<&'static Currency> {
    match code.to_ascii_uppercase().as_str() {
        "USD" => Some(iso::USD),
        "EUR" => Some(iso::EUR),
        "GBP" => Some(iso::GBP),
        "DKK" => Some(iso::DKK),
        "SEK" => Some(iso::SEK),
        "NOK" => Some(iso::NOK),
        _ => None,
    }
}

/// Resolved prices for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPrices<'a> {
    /// Price the shopper pays
    pub calculated: Money<'a, Currency>,

    /// Price before any price list was applied
    pub original: Money<'a, Currency>,

    /// Price list type, or [`DEFAULT_PRICE_TYPE`]
    pub price_type: String,

    /// Fraction of the original price saved
    pub percentage_diff: Percentage,
}

impl VariantPrices<'_> {
    /// Returns true when a price list lowered the price.
    pub fn is_discounted(&self) -> bool {
        self.calculated.amount() < self.original.amount()
    }

    /// Savings as whole percent points, e.g. `25` for a quarter off.
    pub fn percent_points(&self) -> Decimal {
        percent_points(self.percentage_diff)
    }
}

/// Resolves the prices of a variant.
///
/// Returns `None` when the variant has no calculated price or a zero amount.
pub fn variant_prices<'a>(variant: &Variant<'a>) -> Option<VariantPrices<'a>> {
    let price = variant.calculated_price.as_ref()?;

    if price.calculated.is_zero() {
        return None;
    }

    Some(VariantPrices {
        calculated: price.calculated,
        original: price.original,
        price_type: price
            .price_list_type
            .clone()
            .unwrap_or_else(|| DEFAULT_PRICE_TYPE.to_string()),
        percentage_diff: percentage_diff(*price.original.amount(), *price.calculated.amount()),
    })
}

/// Resolves the prices of a product's cheapest variant.
///
/// Only variants with a calculated price are considered; the first of several equally
/// cheap variants wins.
pub fn cheapest_price<'a>(product: &Product<'a>) -> Option<VariantPrices<'a>> {
    let cheapest = product
        .variants
        .iter()
        .filter_map(|variant| {
            variant
                .calculated_price
                .as_ref()
                .map(|price| (variant, *price.calculated.amount()))
        })
        .min_by(|(_, left), (_, right)| left.cmp(right))?;

    variant_prices(cheapest.0)
}

/// Resolves the prices of the variant with the given identifier or SKU.
pub fn variant_price<'a>(product: &Product<'a>, id_or_sku: &str) -> Option<VariantPrices<'a>> {
    product.variant(id_or_sku).and_then(variant_prices)
}

/// Returns the fraction of `original` saved by paying `calculated`.
///
/// A zero original price yields zero.
pub fn percentage_diff(original: Decimal, calculated: Decimal) -> Percentage {
    if original.is_zero() {
        return Percentage::from(Decimal::ZERO);
    }

    Percentage::from((original - calculated) / original)
}

/// Converts a fractional percentage to whole percent points.
pub fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round()
}

/// Formats a price for display, e.g. `€45.00`.
pub fn format_price(price: &Money<'_, Currency>) -> String {
    format!("{price}")
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{DKK, EUR};
    use testresult::TestResult;

    use crate::products::CalculatedPrice;

    use super::*;

    fn priced<'a>(id: &str, calculated: i64, original: i64) -> Variant<'a> {
        Variant::new(id, id).with_price(
            CalculatedPrice::new(Money::from_major(calculated, EUR))
                .with_original(Money::from_major(original, EUR)),
        )
    }

    #[test]
    fn currency_lookup_ignores_case() {
        assert_eq!(currency_for_code("dkk"), Some(DKK));
        assert_eq!(currency_for_code("Eur"), Some(EUR));
        assert_eq!(currency_for_code("XYZ"), None);
    }

    #[test]
    fn variant_prices_report_savings() -> TestResult {
        let mut variant = priced("v1", 30, 40);

        if let Some(price) = variant.calculated_price.as_mut() {
            price.price_list_type = Some("sale".to_string());
        }

        let prices = variant_prices(&variant).ok_or("expected prices")?;

        assert_eq!(prices.calculated, Money::from_major(30, EUR));
        assert_eq!(prices.original, Money::from_major(40, EUR));
        assert_eq!(prices.price_type, "sale");
        assert_eq!(prices.percent_points(), Decimal::from(25));
        assert!(prices.is_discounted());

        Ok(())
    }

    #[test]
    fn variant_prices_default_price_type() -> TestResult {
        let prices = variant_prices(&priced("v1", 30, 30)).ok_or("expected prices")?;

        assert_eq!(prices.price_type, DEFAULT_PRICE_TYPE);
        assert_eq!(prices.percent_points(), Decimal::ZERO);
        assert!(!prices.is_discounted());

        Ok(())
    }

    #[test]
    fn unpriced_variant_has_no_prices() {
        assert_eq!(variant_prices(&Variant::new("v1", "S")), None);
        assert_eq!(variant_prices(&priced("v2", 0, 10)), None);
    }

    #[test]
    fn cheapest_price_picks_lowest_calculated_amount() -> TestResult {
        let product = Product::new("prod_1", "Tee")
            .with_variant(priced("v1", 45, 45))
            .with_variant(Variant::new("v2", "unpriced"))
            .with_variant(priced("v3", 35, 50))
            .with_variant(priced("v4", 35, 35));

        let cheapest = cheapest_price(&product).ok_or("expected a cheapest price")?;

        assert_eq!(cheapest.calculated, Money::from_major(35, EUR));
        assert_eq!(cheapest.original, Money::from_major(50, EUR));

        Ok(())
    }

    #[test]
    fn cheapest_price_is_none_without_prices() {
        let product = Product::new("prod_1", "Tee").with_variant(Variant::new("v1", "S"));

        assert_eq!(cheapest_price(&product), None);
    }

    #[test]
    fn variant_price_looks_up_by_sku() -> TestResult {
        let product = Product::new("prod_1", "Tee")
            .with_variant(priced("v1", 45, 45).with_sku("TEE-S"))
            .with_variant(priced("v2", 50, 50).with_sku("TEE-M"));

        let prices = variant_price(&product, "TEE-M").ok_or("expected prices")?;

        assert_eq!(prices.calculated, Money::from_major(50, EUR));
        assert_eq!(variant_price(&product, "TEE-XL"), None);

        Ok(())
    }

    #[test]
    fn percentage_diff_of_zero_original_is_zero() {
        assert_eq!(
            percentage_diff(Decimal::ZERO, Decimal::TEN),
            Percentage::from(Decimal::ZERO)
        );
    }

    #[test]
    fn percent_points_round_to_whole_numbers() {
        let diff = percentage_diff(Decimal::from(30), Decimal::from(20));

        assert_eq!(percent_points(diff), Decimal::from(33));
    }

    #[test]
    fn format_price_uses_currency_symbol() {
        let formatted = format_price(&Money::from_major(45, EUR));

        assert!(formatted.contains('€'), "unexpected format: {formatted}");
        assert!(formatted.contains("45"), "unexpected format: {formatted}");
    }
}
