//! Lookbook
//!
//! Lookbook turns a storefront catalog into the grid a shopper sees: one tile per product
//! color, narrowed by facet filters and ordered by the chosen sort.

pub mod best_sellers;
pub mod filters;
pub mod fixtures;
pub mod items;
pub mod listing;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod sorting;
pub mod utils;
pub mod variants;
