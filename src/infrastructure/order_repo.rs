use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderStore;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

/// PostgreSQL-backed order store.
pub struct DieselOrderStore {
    pool: DbPool,
}

impl DieselOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for DieselOrderStore {
    fn save(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row: OrderRow = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    order_date: order.order_date,
                    subtotal: order.subtotal.clone(),
                    total: order.total.clone(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let new_items: Vec<NewOrderItemRow> = order
                .items
                .iter()
                .map(|item| NewOrderItemRow {
                    order_id: row.id,
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price.clone(),
                    quantity: item.quantity,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&new_items)
                .execute(conn)?;

            Ok(Order {
                id: row.id,
                order_date: row.order_date,
                items: order.items.clone(),
                subtotal: row.subtotal,
                total: row.total,
            })
        })
    }

    fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .order(orders::order_date.asc())
            .select(OrderRow::as_select())
            .load(&mut conn)?;

        let item_rows = OrderItemRow::belonging_to(&rows)
            .order(order_items::id.asc())
            .select(OrderItemRow::as_select())
            .load(&mut conn)?
            .grouped_by(&rows);

        Ok(rows
            .into_iter()
            .zip(item_rows)
            .map(|(row, items)| row.into_order(items))
            .collect())
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = order_items::table
            .filter(order_items::order_id.eq(row.id))
            .order(order_items::id.asc())
            .select(OrderItemRow::as_select())
            .load(&mut conn)?;

        Ok(Some(row.into_order(item_rows)))
    }
}
