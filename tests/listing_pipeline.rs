//! Integration tests for the expand, filter and sort pipeline over hand-built catalogs.

use jiff::Timestamp;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use lookbook::{
    best_sellers::BestSellerRanking,
    filters::{Facet, filter, price::price_buckets, selection::FilterSelection},
    items::{DisplayItem, expand},
    products::{CalculatedPrice, Product, ProductOption, Variant, VariantOption},
    sorting::{SortKey, sort},
};

fn variant(id: &str, size: &str, color: &str, price: i64) -> Variant<'static> {
    Variant::new(id, format!("{size} / {color}"))
        .with_option(VariantOption::new("opt_size", "Size", size))
        .with_option(VariantOption::new("opt_color", "Color", color))
        .with_inventory(true, false)
        .with_price(CalculatedPrice::new(Money::from_major(price, USD)))
}

fn tee() -> Product<'static> {
    Product::new("prod_tee", "Tee")
        .with_option(ProductOption::new("opt_size", "Size", &["S", "M"]))
        .with_option(ProductOption::new("opt_color", "Color", &["Black", "White"]))
        .with_variant(variant("v_s_black", "S", "Black", 30))
        .with_variant(variant("v_m_black", "M", "Black", 30))
        .with_variant(variant("v_s_white", "S", "White", 30))
}

fn single(id: &str, title: &str, price: i64) -> Product<'static> {
    Product::new(id, title).with_variant(
        Variant::new(format!("{id}_default"), "Default")
            .with_inventory(false, false)
            .with_price(CalculatedPrice::new(Money::from_major(price, USD))),
    )
}

fn ids<'a>(items: &'a [DisplayItem<'a>]) -> Vec<&'a str> {
    items.iter().map(|item| item.product().id.as_str()).collect()
}

fn variant_ids<'a>(items: &'a [DisplayItem<'a>]) -> Vec<&'a str> {
    items.iter().map(|item| item.variant().id.as_str()).collect()
}

#[test]
fn expanding_twice_gives_the_same_items() {
    let products = [tee(), single("prod_cap", "Cap", 20)];

    assert_eq!(expand(&products), expand(&products));
}

#[test]
fn expansion_keeps_the_first_variant_of_each_color() {
    let product = Product::new("prod_tee", "Tee")
        .with_variant(variant("v1", "S", "Black", 30))
        .with_variant(variant("v2", "M", "Olive", 30))
        .with_variant(variant("v3", "M", "black", 30))
        .with_variant(variant("v4", "L", "Olive", 30))
        .with_variant(variant("v5", "L", "Black", 30));
    let products = [product];

    let items = expand(&products);

    assert_eq!(variant_ids(&items), vec!["v1", "v2"]);
    assert_eq!(
        items.iter().map(DisplayItem::color).collect::<Vec<_>>(),
        vec![Some("Black"), Some("Olive")]
    );
}

#[test]
fn beige_is_listed_as_sand() {
    let products =
        [Product::new("prod_chino", "Chino").with_variant(variant("v1", "32", "Beige", 80))];

    let items = expand(&products);

    assert_eq!(items.first().and_then(DisplayItem::color), Some("Sand"));
}

#[test]
fn selecting_both_availability_options_filters_nothing() {
    let mut unknown = single("prod_unknown", "Unknown Stock", 10);
    for variant in &mut unknown.variants {
        variant.manage_inventory = None;
    }

    let products = [tee(), unknown];
    let items = expand(&products);
    let selection =
        FilterSelection::new().with(Facet::Availability, &["in-stock", "out-of-stock"]);

    let filtered = filter(&items, &selection, &price_buckets("USD"));

    assert_eq!(filtered, items);
}

#[test]
fn boundary_price_falls_in_the_upper_bucket_only() {
    let products = [single("prod_belt", "Belt", 50)];
    let items = expand(&products);
    let buckets = price_buckets("USD");

    let lower = filter(&items, &FilterSelection::new().with(Facet::Price, &["0-50"]), &buckets);
    let upper = filter(&items, &FilterSelection::new().with(Facet::Price, &["50-100"]), &buckets);

    assert!(lower.is_empty());
    assert_eq!(ids(&upper), vec!["prod_belt"]);
}

#[test]
fn featured_sort_never_reorders_unranked_items() {
    let products = [
        single("p1", "One", 10),
        single("p2", "Two", 10),
        single("p3", "Three", 10),
        single("p4", "Four", 10),
    ];
    let items = expand(&products);
    let ranking = BestSellerRanking::new(["p3"]);

    let sorted = sort(&items, SortKey::Featured, &ranking);

    assert_eq!(ids(&sorted), vec!["p3", "p1", "p2", "p4"]);
}

#[test]
fn tee_with_color_filter_lists_the_black_tile() {
    let products = [tee()];
    let items = expand(&products);

    assert_eq!(variant_ids(&items), vec!["v_s_black", "v_s_white"]);

    let selection = FilterSelection::new().with(Facet::Color, &["black"]);
    let filtered = filter(&items, &selection, &price_buckets("USD"));

    assert_eq!(variant_ids(&filtered), vec!["v_s_black"]);
}

#[test]
fn featured_sort_puts_best_sellers_first() {
    let products = [
        single("p1", "One", 10),
        single("p2", "Two", 10),
        single("p3", "Three", 10),
    ];
    let items = expand(&products);
    let ranking = BestSellerRanking::new(["p2", "p5"]);

    let sorted = sort(&items, SortKey::Featured, &ranking);

    assert_eq!(ids(&sorted), vec!["p2", "p1", "p3"]);
}

#[test]
fn filter_then_sort_by_price_lists_unpriced_items_last() -> TestResult {
    let mut unpriced = single("p_unpriced", "Sample", 0);
    for variant in &mut unpriced.variants {
        variant.calculated_price = None;
    }

    let products = [
        unpriced,
        single("p_dear", "Coat", 240),
        single("p_cheap", "Socks", 12),
        single("p_free", "Sticker", 0),
    ];
    let items = expand(&products);

    let ascending = sort(&items, SortKey::PriceAsc, &BestSellerRanking::default());
    let descending = sort(&items, SortKey::PriceDesc, &BestSellerRanking::default());

    assert_eq!(ids(&ascending), vec!["p_cheap", "p_dear", "p_unpriced", "p_free"]);
    assert_eq!(ids(&descending), vec!["p_dear", "p_cheap", "p_unpriced", "p_free"]);

    let selection = FilterSelection::new().with(Facet::Price, &["150-plus"]);
    let filtered = filter(&items, &selection, &price_buckets("usd"));

    assert_eq!(ids(&filtered), vec!["p_dear"]);

    Ok(())
}

#[test]
fn newest_sort_lists_undated_products_last() -> TestResult {
    let products = [
        single("p_undated", "Undated", 10),
        single("p_old", "Old", 10).created_at("2024-01-01T00:00:00Z".parse::<Timestamp>()?),
        single("p_new", "New", 10).created_at("2025-06-01T00:00:00Z".parse::<Timestamp>()?),
    ];
    let items = expand(&products);

    let sorted = sort(&items, SortKey::Newest, &BestSellerRanking::default());

    assert_eq!(ids(&sorted), vec!["p_new", "p_old", "p_undated"]);

    Ok(())
}
