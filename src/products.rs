//! Products
//!
//! Catalog data as it arrives from the product listing query. Everything here is plain
//! data; the listing pipeline only ever borrows it.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

/// Option titles that identify a variant's color.
const COLOR_OPTION_TITLES: [&str; 2] = ["color", "colour"];

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: String,

    /// Product title
    pub title: String,

    /// URL slug
    pub handle: String,

    /// Creation timestamp, if the catalog reported one
    pub created_at: Option<Timestamp>,

    /// Declared options (e.g. "Color", "Size")
    pub options: SmallVec<[ProductOption; 3]>,

    /// Purchasable variants, in catalog order
    pub variants: Vec<Variant<'a>>,

    /// Product images
    pub images: Vec<Image>,
}

impl<'a> Product<'a> {
    /// Creates a product with no options, variants or images.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();

        Self {
            id: id.into(),
            handle: handleize(&title),
            title,
            created_at: None,
            options: SmallVec::new(),
            variants: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Adds a declared option.
    #[must_use]
    pub fn with_option(mut self, option: ProductOption) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant<'a>) -> Self {
        self.variants.push(variant);
        self
    }

    /// Returns the first variant in catalog order.
    pub fn first_variant(&self) -> Option<&Variant<'a>> {
        self.variants.first()
    }

    /// Finds a variant by identifier or SKU.
    pub fn variant(&self, id_or_sku: &str) -> Option<&Variant<'a>> {
        self.variants
            .iter()
            .find(|variant| variant.id == id_or_sku || variant.sku.as_deref() == Some(id_or_sku))
    }
}

/// A declared product option and its allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    /// Option identifier
    pub id: String,

    /// Option title (e.g. "Size")
    pub title: String,

    /// Allowed values
    pub values: SmallVec<[String; 6]>,
}

impl ProductOption {
    /// Creates a product option from its allowed values.
    pub fn new(id: impl Into<String>, title: impl Into<String>, values: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            values: values.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A variant's value for one of the product's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOption {
    /// Identifier of the product option this value belongs to
    pub option_id: String,

    /// Title of the product option this value belongs to
    pub title: String,

    /// Selected value; the catalog occasionally omits it
    pub value: Option<String>,
}

impl VariantOption {
    /// Creates a variant option value.
    pub fn new(
        option_id: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            option_id: option_id.into(),
            title: title.into(),
            value: Some(value.into()),
        }
    }

    /// Returns true when this option describes a color.
    pub fn is_color(&self) -> bool {
        is_color_title(&self.title)
    }
}

/// Calculated price for a variant in the shopper's region.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedPrice<'a> {
    /// Price the shopper pays
    pub calculated: Money<'a, Currency>,

    /// Price before any price list was applied
    pub original: Money<'a, Currency>,

    /// Price list type that produced `calculated` (e.g. "sale")
    pub price_list_type: Option<String>,
}

impl<'a> CalculatedPrice<'a> {
    /// Creates a calculated price with no price list applied.
    pub fn new(calculated: Money<'a, Currency>) -> Self {
        Self {
            calculated,
            original: calculated,
            price_list_type: None,
        }
    }

    /// Sets the pre-price-list amount.
    #[must_use]
    pub fn with_original(mut self, original: Money<'a, Currency>) -> Self {
        self.original = original;
        self
    }

    /// Currency of the calculated amount.
    pub fn currency(&self) -> &'a Currency {
        self.calculated.currency()
    }
}

/// Variant
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    /// Variant identifier
    pub id: String,

    /// Variant title (e.g. "S / Black")
    pub title: String,

    /// Stock keeping unit
    pub sku: Option<String>,

    /// Option values for this variant
    pub options: SmallVec<[VariantOption; 3]>,

    /// Whether inventory is tracked; `None` when the catalog did not say
    pub manage_inventory: Option<bool>,

    /// Whether the variant may be sold past zero stock; `None` when the catalog did not say
    pub allow_backorder: Option<bool>,

    /// Stocked quantity, when inventory levels were requested
    pub inventory_quantity: Option<i64>,

    /// Price in the shopper's region
    pub calculated_price: Option<CalculatedPrice<'a>>,

    /// Images linked to this variant
    pub images: Vec<Image>,
}

impl<'a> Variant<'a> {
    /// Creates a variant with no options, price or inventory flags.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sku: None,
            options: SmallVec::new(),
            manage_inventory: None,
            allow_backorder: None,
            inventory_quantity: None,
            calculated_price: None,
            images: Vec::new(),
        }
    }

    /// Adds an option value.
    #[must_use]
    pub fn with_option(mut self, option: VariantOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the calculated price.
    #[must_use]
    pub fn with_price(mut self, price: CalculatedPrice<'a>) -> Self {
        self.calculated_price = Some(price);
        self
    }

    /// Sets the inventory flags.
    #[must_use]
    pub fn with_inventory(mut self, manage_inventory: bool, allow_backorder: bool) -> Self {
        self.manage_inventory = Some(manage_inventory);
        self.allow_backorder = Some(allow_backorder);
        self
    }

    /// Sets the stocked quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.inventory_quantity = Some(quantity);
        self
    }

    /// Sets the SKU.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Returns the variant's color value, if it has a non-empty one.
    pub fn color(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.is_color())
            .and_then(|option| option.value.as_deref())
            .filter(|value| !value.is_empty())
    }

    /// Returns the calculated price used for listing, filtering and sorting.
    ///
    /// A zero amount is treated the same as a missing price.
    pub fn listing_price(&self) -> Option<&Money<'a, Currency>> {
        self.calculated_price
            .as_ref()
            .map(|price| &price.calculated)
            .filter(|money| !money.is_zero())
    }
}

/// Product or variant image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image identifier
    pub id: String,

    /// Image URL
    pub url: String,
}

fn is_color_title(title: &str) -> bool {
    COLOR_OPTION_TITLES
        .iter()
        .any(|color| title.eq_ignore_ascii_case(color))
}

/// Derives a URL slug from a title.
pub(crate) fn handleize(title: &str) -> String {
    title
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
