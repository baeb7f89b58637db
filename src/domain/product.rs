use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Catalog reference data. Seeded at migration time and never mutated
/// by the checkout flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
}
