//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    best_sellers::{BestSellerRanking, LineItem},
    fixtures::{orders::OrdersFixture, products::ProductsFixture},
    listing::Listing,
    pricing::currency_for_code,
    products::Product,
};

pub mod orders;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Variant references an option its product does not declare
    #[error("Product {product} has no option {option}")]
    UnknownOption {
        /// Product identifier
        product: String,
        /// Option identifier referenced by the variant
        option: String,
    },

    /// Product identifier appears more than once
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No priced products loaded yet
    #[error("No priced products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in catalog order
    products: Vec<Product<'a>>,

    /// Order line items feeding the best-seller ranking
    line_items: Vec<LineItem>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            line_items: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a product id repeats, or
    /// if prices use more than one currency.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let mut seen: FxHashSet<String> =
            self.products.iter().map(|product| product.id.clone()).collect();
        let mut currency = self.currency;
        let mut loaded = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            if !seen.insert(product_fixture.id.clone()) {
                return Err(FixtureError::DuplicateProduct(product_fixture.id));
            }

            let product: Product<'a> = product_fixture.try_into()?;

            for price in product
                .variants
                .iter()
                .filter_map(|variant| variant.calculated_price.as_ref())
            {
                currency = Some(check_currency(currency, price.currency())?);
            }

            loaded.push(product);
        }

        self.currency = currency;
        self.products.extend(loaded);

        Ok(self)
    }

    /// Load order line items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        self.line_items.extend(fixture.line_items);

        Ok(self)
    }

    /// Load a complete fixture set (products and orders with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_orders(name)?;

        Ok(fixture)
    }

    /// Get a product by its identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product<'a>, FixtureError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Get all products in catalog order
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Get all order line items
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Best-seller ranking aggregated from the loaded orders
    pub fn ranking(&self) -> BestSellerRanking {
        BestSellerRanking::from_line_items(&self.line_items)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no priced products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a listing over the loaded products in the fixture's currency
    ///
    /// # Errors
    ///
    /// Returns an error if no priced products have been loaded yet.
    pub fn listing(&self) -> Result<Listing<'_>, FixtureError> {
        let currency = self.currency()?;

        Ok(Listing::new(
            &self.products,
            currency.iso_alpha_code,
            self.ranking(),
        ))
    }
}

/// Resolves a price's currency against the set's currency so far.
fn check_currency(
    existing: Option<&'static Currency>,
    found: &Currency,
) -> Result<&'static Currency, FixtureError> {
    let found = currency_for_code(found.iso_alpha_code)
        .ok_or_else(|| FixtureError::UnknownCurrency(found.iso_alpha_code.to_string()))?;

    match existing {
        Some(existing) if existing != found => Err(FixtureError::CurrencyMismatch(
            existing.iso_alpha_code.to_string(),
            found.iso_alpha_code.to_string(),
        )),
        _ => Ok(found),
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
