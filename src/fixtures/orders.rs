//! Order Fixtures

use serde::Deserialize;

use crate::best_sellers::LineItem;

/// Wrapper for order line items in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Line items across all orders in the set
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}
