//! Price Buckets
//!
//! Currency-scaled price tiers for the price facet. Each bucket is a half-open range
//! `[min, max)`; the last bucket of a table has no upper bound.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::pricing::currency_for_code;

/// Bucket boundaries for currencies priced like the US dollar and the euro.
const STANDARD_BOUNDS: [i64; 3] = [50, 100, 150];

/// Bucket boundaries for the pound, roughly 0.8x the standard table.
const GBP_BOUNDS: [i64; 3] = [40, 80, 120];

/// Bucket boundaries for the Danish krone, roughly 7x the standard table.
const DKK_BOUNDS: [i64; 3] = [350, 700, 1050];

/// A labelled price tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBucket {
    /// Identifier used in filter selections (e.g. "50-100")
    pub id: String,

    /// Display label (e.g. "$50 - $100")
    pub label: String,

    /// Inclusive lower bound
    pub min: Decimal,

    /// Exclusive upper bound; `None` is unbounded
    pub max: Option<Decimal>,
}

impl PriceBucket {
    /// Returns true when the amount falls in `[min, max)`.
    ///
    /// A missing amount is an infinite price and falls in no bucket.
    pub fn contains(&self, amount: Option<Decimal>) -> bool {
        let Some(amount) = amount else {
            return false;
        };

        amount >= self.min && self.max.is_none_or(|max| amount < max)
    }
}

/// Returns the price buckets for a currency.
///
/// Unknown currencies use the standard table.
pub fn price_buckets(currency_code: &str) -> SmallVec<[PriceBucket; 4]> {
    let bounds = match currency_code.to_ascii_uppercase().as_str() {
        "GBP" => GBP_BOUNDS,
        "DKK" => DKK_BOUNDS,
        _ => STANDARD_BOUNDS,
    };

    let symbol = Symbol::for_code(currency_code);
    let mut buckets = SmallVec::new();
    let mut lower = 0;

    for upper in bounds {
        let label = if lower == 0 {
            format!("Under {}", symbol.amount(upper))
        } else {
            format!("{} - {}", symbol.amount(lower), symbol.amount(upper))
        };

        buckets.push(PriceBucket {
            id: format!("{lower}-{upper}"),
            label,
            min: Decimal::from(lower),
            max: Some(Decimal::from(upper)),
        });

        lower = upper;
    }

    buckets.push(PriceBucket {
        id: format!("{lower}-plus"),
        label: format!("{}+", symbol.amount(lower)),
        min: Decimal::from(lower),
        max: None,
    });

    buckets
}

/// Currency symbol placement for bucket labels.
struct Symbol {
    symbol: String,
    first: bool,
}

impl Symbol {
    fn for_code(currency_code: &str) -> Self {
        currency_for_code(currency_code).map_or_else(
            || Self {
                symbol: currency_code.to_ascii_uppercase(),
                first: true,
            },
            |currency| Self {
                symbol: currency.symbol.to_string(),
                first: currency.symbol_first,
            },
        )
    }

    fn amount(&self, amount: i64) -> String {
        if self.first {
            format!("{}{amount}", self.symbol)
        } else {
            format!("{amount} {}", self.symbol)
        }
    }
}
