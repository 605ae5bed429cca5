//! Lookbook prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    best_sellers::{BestSellerError, BestSellerRanking, BestSellingResponse, LineItem},
    filters::{
        Facet, FacetError, FilterGroup, FilterOption, facet_groups, filter,
        price::{PriceBucket, price_buckets},
        selection::{FilterSelection, OptionSet},
    },
    fixtures::{Fixture, FixtureError},
    items::{DisplayItem, expand},
    listing::{
        Listing, ListingQuery,
        table::{ListingTableError, write_to},
    },
    pricing::{VariantPrices, cheapest_price, variant_price, variant_prices},
    products::{CalculatedPrice, Image, Product, ProductOption, Variant, VariantOption},
    sorting::{SortKey, SortKeyError, sort},
    variants::{OptionSelection, is_variant_in_stock, select_variant},
};
