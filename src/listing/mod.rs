//! Listing
//!
//! The listing pipeline shared by the store, category and collection pages:
//! expand products into tiles, filter by facets, then sort.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    best_sellers::BestSellerRanking,
    filters::{self, FilterGroup, price::PriceBucket, selection::FilterSelection},
    items::{self, DisplayItem},
    products::Product,
    sorting::{self, SortKey},
};

pub mod table;

/// The shopper's filter and sort choices for one listing render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Active facet selections
    pub selection: FilterSelection,

    /// Sort strategy
    pub sort: SortKey,
}

impl ListingQuery {
    /// Creates a query with no filters and the default sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the facet selections.
    #[must_use]
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the sort strategy.
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// One listing page's inputs: the product source, the shopper's currency and the
/// best-seller ranking.
#[derive(Debug)]
pub struct Listing<'a> {
    products: &'a [Product<'a>],
    currency_code: String,
    price_buckets: SmallVec<[PriceBucket; 4]>,
    ranking: BestSellerRanking,
}

impl<'a> Listing<'a> {
    /// Creates a listing over a product source.
    pub fn new(
        products: &'a [Product<'a>],
        currency_code: impl Into<String>,
        ranking: BestSellerRanking,
    ) -> Self {
        let currency_code = currency_code.into();
        let price_buckets = filters::price::price_buckets(&currency_code);

        Self {
            products,
            currency_code,
            price_buckets,
            ranking,
        }
    }

    /// Produces the tiles to render for a query.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(currency = %self.currency_code, sort = %query.sort)
    )]
    pub fn items(&self, query: &ListingQuery) -> Vec<DisplayItem<'a>> {
        let expanded = items::expand(self.products);
        let filtered = filters::filter(&expanded, &query.selection, &self.price_buckets);

        debug!(
            products = self.products.len(),
            expanded = expanded.len(),
            filtered = filtered.len(),
            ranked = self.ranking.len(),
            "filtered listing"
        );

        sorting::sort(&filtered, query.sort, &self.ranking)
    }

    /// Builds the filter bar for this listing.
    pub fn facet_groups(&self) -> SmallVec<[FilterGroup; 3]> {
        filters::facet_groups(self.products, &self.currency_code)
    }

    /// Price buckets for the listing's currency.
    pub fn price_buckets(&self) -> &[PriceBucket] {
        &self.price_buckets
    }

    /// Currency the listing is priced in.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Best-seller ranking used by the featured sort.
    pub fn ranking(&self) -> &BestSellerRanking {
        &self.ranking
    }
}
