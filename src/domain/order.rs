use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::basket::LineItem;

/// The draft handed to the store at confirmation: a snapshot of the
/// basket plus the priced totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
}

/// A confirmed, persisted order. Immutable once created; historical
/// orders are never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
}

impl Order {
    /// The discount applied at confirmation time.
    pub fn discount(&self) -> BigDecimal {
        &self.subtotal - &self.total
    }

    /// Total number of units across all line-items.
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
