//! Product Fixtures

use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::FixtureError,
    pricing::currency_for_code,
    products::{CalculatedPrice, Image, Product, ProductOption, Variant, VariantOption, handleize},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product title
    pub title: String,

    /// URL slug; derived from the title when omitted
    #[serde(default)]
    pub handle: Option<String>,

    /// Creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: Option<Timestamp>,

    /// Declared options
    #[serde(default)]
    pub options: Vec<OptionFixture>,

    /// Variants in catalog order
    #[serde(default)]
    pub variants: Vec<VariantFixture>,

    /// Product images
    #[serde(default)]
    pub images: Vec<ImageFixture>,
}

/// Product Option Fixture
#[derive(Debug, Deserialize)]
pub struct OptionFixture {
    /// Option identifier
    pub id: String,

    /// Option title
    pub title: String,

    /// Allowed values
    #[serde(default)]
    pub values: Vec<String>,
}

/// Variant Fixture
#[derive(Debug, Deserialize)]
pub struct VariantFixture {
    /// Variant identifier
    pub id: String,

    /// Variant title
    pub title: String,

    /// Stock keeping unit
    #[serde(default)]
    pub sku: Option<String>,

    /// Option identifier -> value
    #[serde(default)]
    pub options: BTreeMap<String, String>,

    /// Whether inventory is tracked
    #[serde(default)]
    pub manage_inventory: Option<bool>,

    /// Whether backorders are allowed
    #[serde(default)]
    pub allow_backorder: Option<bool>,

    /// Stocked quantity
    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    /// Calculated price (e.g. "45.00 EUR")
    #[serde(default)]
    pub price: Option<String>,

    /// Price before price lists (e.g. "55.00 EUR")
    #[serde(default)]
    pub original_price: Option<String>,

    /// Price list type (e.g. "sale")
    #[serde(default)]
    pub price_list_type: Option<String>,

    /// Images linked to this variant
    #[serde(default)]
    pub images: Vec<ImageFixture>,
}

/// Image Fixture
#[derive(Debug, Deserialize)]
pub struct ImageFixture {
    /// Image identifier
    pub id: String,

    /// Image URL
    pub url: String,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let options: SmallVec<[ProductOption; 3]> = fixture
            .options
            .into_iter()
            .map(|option| ProductOption {
                id: option.id,
                title: option.title,
                values: option.values.into_iter().collect(),
            })
            .collect();

        let variants = fixture
            .variants
            .into_iter()
            .map(|variant| variant_from_fixture(&fixture.id, &options, variant))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Product {
            handle: fixture.handle.unwrap_or_else(|| handleize(&fixture.title)),
            id: fixture.id,
            title: fixture.title,
            created_at: fixture.created_at,
            options,
            variants,
            images: fixture.images.into_iter().map(Image::from).collect(),
        })
    }
}

impl From<ImageFixture> for Image {
    fn from(fixture: ImageFixture) -> Self {
        Image {
            id: fixture.id,
            url: fixture.url,
        }
    }
}

fn variant_from_fixture<'a>(
    product_id: &str,
    options: &[ProductOption],
    fixture: VariantFixture,
) -> Result<Variant<'a>, FixtureError> {
    let variant_options = fixture
        .options
        .into_iter()
        .map(|(option_id, value)| {
            let title = options
                .iter()
                .find(|option| option.id == option_id)
                .map(|option| option.title.clone())
                .ok_or_else(|| FixtureError::UnknownOption {
                    product: product_id.to_string(),
                    option: option_id.clone(),
                })?;

            Ok(VariantOption {
                option_id,
                title,
                value: Some(value),
            })
        })
        .collect::<Result<SmallVec<[VariantOption; 3]>, FixtureError>>()?;

    let calculated_price = fixture
        .price
        .as_deref()
        .map(|price| -> Result<CalculatedPrice<'a>, FixtureError> {
            let calculated = parse_money(price)?;
            let original = fixture
                .original_price
                .as_deref()
                .map(parse_money)
                .transpose()?
                .unwrap_or(calculated);

            if original.currency() != calculated.currency() {
                return Err(FixtureError::CurrencyMismatch(
                    calculated.currency().iso_alpha_code.to_string(),
                    original.currency().iso_alpha_code.to_string(),
                ));
            }

            Ok(CalculatedPrice {
                calculated,
                original,
                price_list_type: fixture.price_list_type.clone(),
            })
        })
        .transpose()?;

    Ok(Variant {
        id: fixture.id,
        title: fixture.title,
        sku: fixture.sku,
        options: variant_options,
        manage_inventory: fixture.manage_inventory,
        allow_backorder: fixture.allow_backorder,
        inventory_quantity: fixture.inventory_quantity,
        calculated_price,
        images: fixture.images.into_iter().map(Image::from).collect(),
    })
}

fn parse_money<'a>(s: &str) -> Result<Money<'a, Currency>, FixtureError> {
    let (amount, currency) = parse_price(s)?;

    Ok(Money::from_decimal(amount, currency))
}

/// Parse price string (e.g., "45.00 EUR") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the
/// amount is not a decimal number, or if the currency code is not supported.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: SmallVec<[&str; 2]> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = currency_for_code(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    Ok((amount, currency))
}
