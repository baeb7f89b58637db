use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::basket::LineItem;
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::schema::{order_items, orders, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub order_date: DateTime<Utc>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

impl From<OrderItemRow> for LineItem {
    fn from(row: OrderItemRow) -> Self {
        LineItem {
            product_id: row.product_id,
            product_name: row.product_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

impl OrderRow {
    /// Assemble the domain order from its row and item rows, preserving
    /// the item rows' order.
    pub fn into_order(self, item_rows: Vec<OrderItemRow>) -> Order {
        Order {
            id: self.id,
            order_date: self.order_date,
            items: item_rows.into_iter().map(LineItem::from).collect(),
            subtotal: self.subtotal,
            total: self.total,
        }
    }
}
