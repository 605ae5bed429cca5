//! Best Sellers
//!
//! Product rankings by total quantity ordered, as served by the store's best-selling
//! endpoint.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors decoding a best-selling payload.
#[derive(Debug, Error)]
pub enum BestSellerError {
    /// The payload was not valid JSON for the endpoint's shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An order line item, as far as sales ranking is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product the line item was for; gift cards and custom items have none
    pub product_id: Option<String>,

    /// Quantity ordered
    pub quantity: Option<u64>,
}

impl LineItem {
    /// Creates a line item for a product.
    pub fn new(product_id: impl Into<String>, quantity: u64) -> Self {
        Self {
            product_id: Some(product_id.into()),
            quantity: Some(quantity),
        }
    }
}

/// Payload of the best-selling endpoint.
///
/// Failures are reported as an empty list alongside an error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellingResponse {
    /// Product identifiers, most sold first
    pub product_ids: Vec<String>,

    /// Failure message, when the aggregation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BestSellingResponse {
    /// Decodes a payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`BestSellerError`] if the payload is not valid JSON of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, BestSellerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`BestSellerError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, BestSellerError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Product identifiers ordered by sales, most sold first.
///
/// An empty ranking means no ranking is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestSellerRanking {
    product_ids: Vec<String>,
}

impl BestSellerRanking {
    /// Creates a ranking from product identifiers, most sold first.
    pub fn new<I, S>(product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            product_ids: product_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Aggregates order line items into a ranking.
    ///
    /// Quantities are summed per product; a missing or zero quantity counts as one.
    /// Line items without a product are skipped. Products with equal totals keep the
    /// order in which they were first seen.
    pub fn from_line_items<'a>(line_items: impl IntoIterator<Item = &'a LineItem>) -> Self {
        let mut totals: Vec<(&'a str, u64)> = Vec::new();
        let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();

        for line_item in line_items {
            let Some(product_id) = line_item.product_id.as_deref() else {
                continue;
            };

            let quantity = line_item.quantity.filter(|quantity| *quantity > 0).unwrap_or(1);
            let next = totals.len();
            let position = *index.entry(product_id).or_insert(next);

            if position == next {
                totals.push((product_id, quantity));
            } else if let Some((_, total)) = totals.get_mut(position) {
                *total = total.saturating_add(quantity);
            }
        }

        totals.sort_by(|(_, left), (_, right)| right.cmp(left));

        Self::new(totals.into_iter().map(|(product_id, _)| product_id))
    }

    /// Zero-based rank of a product, if it is ranked.
    pub fn position(&self, product_id: &str) -> Option<usize> {
        self.product_ids.iter().position(|id| id == product_id)
    }

    /// Rank of every ranked product; a repeated identifier keeps its best rank.
    pub fn positions(&self) -> FxHashMap<&str, usize> {
        let mut positions = FxHashMap::default();

        for (position, id) in self.product_ids.iter().enumerate() {
            positions.entry(id.as_str()).or_insert(position);
        }

        positions
    }

    /// Ranked product identifiers, most sold first.
    pub fn product_ids(&self) -> &[String] {
        &self.product_ids
    }

    /// Number of ranked products.
    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    /// Check if no ranking is available.
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}

impl From<BestSellingResponse> for BestSellerRanking {
    fn from(response: BestSellingResponse) -> Self {
        if let Some(error) = response.error {
            warn!(%error, "best-selling endpoint reported an error; listing without a ranking");

            return Self::default();
        }

        Self::new(response.product_ids)
    }
}

impl From<&BestSellerRanking> for BestSellingResponse {
    fn from(ranking: &BestSellerRanking) -> Self {
        Self {
            product_ids: ranking.product_ids.clone(),
            error: None,
        }
    }
}
