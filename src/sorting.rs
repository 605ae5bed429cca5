//! Sorting
//!
//! Orders display items for a listing page. Every strategy is a stable sort, so items
//! that compare equal keep their input order.

use std::{cmp::Ordering, fmt, str::FromStr};

use feruca::Collator;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{best_sellers::BestSellerRanking, items::DisplayItem};

/// Errors parsing a sort key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortKeyError {
    /// The identifier names no sort strategy.
    #[error("unknown sort key: {0}")]
    Unknown(String),
}

/// Listing sort strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Best-seller rank; unranked products last
    #[default]
    Featured,

    /// Newest products first
    Newest,

    /// Cheapest first; unpriced last
    PriceAsc,

    /// Most expensive first; unpriced last
    PriceDesc,

    /// Title A-Z
    TitleAsc,
}

impl SortKey {
    /// All sort keys in dropdown order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::Newest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::TitleAsc,
    ];

    /// Identifier used in URLs and configuration.
    pub fn id(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::TitleAsc => "title-asc",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Featured => "Best selling",
            SortKey::Newest => "Newest",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::TitleAsc => "A-Z",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.id() == s)
            .ok_or_else(|| SortKeyError::Unknown(s.to_string()))
    }
}

/// Returns the items ordered by the given strategy.
pub fn sort<'a>(
    items: &[DisplayItem<'a>],
    key: SortKey,
    ranking: &BestSellerRanking,
) -> Vec<DisplayItem<'a>> {
    let mut sorted = items.to_vec();

    match key {
        SortKey::Featured => {
            let ranks = ranking.positions();

            sorted.sort_by_key(|item| rank(&ranks, item));
        }
        SortKey::Newest => {
            sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
        }
        SortKey::PriceAsc => {
            sorted.sort_by(|a, b| by_price(a, b, Ordering::Less));
        }
        SortKey::PriceDesc => {
            sorted.sort_by(|a, b| by_price(a, b, Ordering::Greater));
        }
        SortKey::TitleAsc => {
            let mut collator = Collator::default();

            sorted.sort_by(|a, b| {
                collator.collate(a.product().title.as_str(), b.product().title.as_str())
            });
        }
    }

    sorted
}

/// Rank key for featured sorting; unranked items sort after every ranked item.
fn rank(ranks: &FxHashMap<&str, usize>, item: &DisplayItem<'_>) -> (bool, usize) {
    ranks
        .get(item.product().id.as_str())
        .map_or((true, 0), |position| (false, *position))
}

fn created_at(item: &DisplayItem<'_>) -> Timestamp {
    item.product().created_at.unwrap_or(Timestamp::UNIX_EPOCH)
}

/// Compares listing prices; `cheaper` is the ordering of a cheaper item before a dearer one.
///
/// Unpriced items sort last whichever the direction.
fn by_price(a: &DisplayItem<'_>, b: &DisplayItem<'_>, cheaper: Ordering) -> Ordering {
    match (a.amount(), b.amount()) {
        (Some(left), Some(right)) => match left.cmp(&right) {
            Ordering::Less => cheaper,
            Ordering::Greater => cheaper.reverse(),
            Ordering::Equal => Ordering::Equal,
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares titles the way a shopper reads an A-Z list.
///
/// Uses the Unicode Collation Algorithm with the root locale: accents are secondary
/// differences, punctuation is ignored at the primary level, and when titles differ only
/// by case lowercase sorts before uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{
        items::expand,
        products::{CalculatedPrice, Product, Variant},
    };

    use super::*;

    fn product<'a>(id: &str, title: &str, price: Option<i64>) -> Product<'a> {
        let variant = Variant::new(format!("{id}_v1"), "Default");
        let variant = match price {
            Some(amount) => {
                variant.with_price(CalculatedPrice::new(Money::from_major(amount, EUR)))
            }
            None => variant,
        };

        Product::new(id, title).with_variant(variant)
    }

    fn ids<'a>(items: &'a [DisplayItem<'a>]) -> Vec<&'a str> {
        items.iter().map(|item| item.product().id.as_str()).collect()
    }

    #[test]
    fn sort_key_round_trips_identifiers() -> TestResult {
        for key in SortKey::ALL {
            assert_eq!(key.id().parse::<SortKey>()?, key);
        }

        assert_eq!(SortKey::default(), SortKey::Featured);
        assert_eq!(
            "relevance".parse::<SortKey>(),
            Err(SortKeyError::Unknown("relevance".to_string()))
        );

        Ok(())
    }

    #[test]
    fn featured_ranks_best_sellers_first() {
        let products = [
            product("p1", "A", None),
            product("p2", "B", None),
            product("p3", "C", None),
        ];
        let items = expand(&products);
        let ranking = BestSellerRanking::new(["p2", "p5"]);

        let sorted = sort(&items, SortKey::Featured, &ranking);

        assert_eq!(ids(&sorted), vec!["p2", "p1", "p3"]);
    }

    #[test]
    fn featured_keeps_unranked_order() {
        let products = [
            product("c", "C", None),
            product("b", "B", None),
            product("a", "A", None),
        ];
        let items = expand(&products);
        let ranking = BestSellerRanking::new(["b"]);

        let sorted = sort(&items, SortKey::Featured, &ranking);

        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn featured_without_ranking_keeps_input_order() {
        let products = [product("p2", "B", None), product("p1", "A", None)];
        let items = expand(&products);

        let sorted = sort(&items, SortKey::Featured, &BestSellerRanking::default());

        assert_eq!(ids(&sorted), vec!["p2", "p1"]);
    }

    #[test]
    fn price_sorts_put_unpriced_last_both_ways() {
        let products = [
            product("free", "Unpriced", None),
            product("mid", "Mid", Some(50)),
            product("low", "Low", Some(20)),
            product("high", "High", Some(90)),
        ];
        let items = expand(&products);
        let ranking = BestSellerRanking::default();

        assert_eq!(
            ids(&sort(&items, SortKey::PriceAsc, &ranking)),
            vec!["low", "mid", "high", "free"]
        );
        assert_eq!(
            ids(&sort(&items, SortKey::PriceDesc, &ranking)),
            vec!["high", "mid", "low", "free"]
        );
    }

    #[test]
    fn equal_prices_keep_input_order() {
        let products = [
            product("first", "First", Some(30)),
            product("second", "Second", Some(30)),
        ];
        let items = expand(&products);
        let ranking = BestSellerRanking::default();

        assert_eq!(
            ids(&sort(&items, SortKey::PriceDesc, &ranking)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn title_sort_ignores_case() {
        let products = [
            product("p1", "zip hoodie", None),
            product("p2", "Anorak", None),
            product("p3", "beanie", None),
        ];
        let items = expand(&products);

        let sorted = sort(&items, SortKey::TitleAsc, &BestSellerRanking::default());

        assert_eq!(ids(&sorted), vec!["p2", "p3", "p1"]);
    }

    #[test]
    fn compare_titles_puts_lowercase_first_on_case_ties() {
        assert_eq!(compare_titles("tee", "Tee"), Ordering::Less);
        assert_eq!(compare_titles("Tee", "tee"), Ordering::Greater);
        assert_eq!(compare_titles("Tee", "Tee"), Ordering::Equal);
        assert_eq!(compare_titles("Tee", "tees"), Ordering::Less);
    }

    #[test]
    fn compare_titles_treats_accents_as_base_letters() {
        assert_eq!(compare_titles("Éclair Tee", "Field Jacket"), Ordering::Less);
        assert_eq!(compare_titles("étoile Scarf", "Eton Shirt"), Ordering::Less);
    }

    #[test]
    fn compare_titles_ignores_punctuation_first() {
        assert_eq!(compare_titles("T-Shirt", "Tank"), Ordering::Greater);
        assert_eq!(compare_titles("Rib Socks 3-Pack", "Rib Socks"), Ordering::Greater);
    }

    #[test]
    fn title_sort_places_accented_titles_by_base_letter() {
        let products = [
            product("p1", "Field Jacket", None),
            product("p2", "Éclair Tee", None),
            product("p3", "T-Shirt", None),
            product("p4", "Tank", None),
        ];
        let items = expand(&products);

        let sorted = sort(&items, SortKey::TitleAsc, &BestSellerRanking::default());

        assert_eq!(ids(&sorted), vec!["p2", "p1", "p4", "p3"]);
    }

    #[test]
    fn newest_sorts_missing_timestamps_last() -> TestResult {
        let products = [
            product("undated", "Undated", None),
            product("old", "Old", None).created_at("2024-01-01T00:00:00Z".parse()?),
            product("new", "New", None).created_at("2025-06-01T00:00:00Z".parse()?),
        ];
        let items = expand(&products);

        let sorted = sort(&items, SortKey::Newest, &BestSellerRanking::default());

        assert_eq!(ids(&sorted), vec!["new", "old", "undated"]);

        Ok(())
    }

    #[test]
    fn sort_leaves_input_untouched() {
        let products = [product("p1", "B", Some(20)), product("p2", "A", Some(10))];
        let items = expand(&products);
        let before = items.clone();

        let _sorted = sort(&items, SortKey::PriceAsc, &BestSellerRanking::default());

        assert_eq!(items, before);
    }
}
