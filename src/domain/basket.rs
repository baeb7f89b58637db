//! In-memory basket of line-items, unique by product id.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::product::Product;

/// A basket entry. `product_name` and `unit_price` are snapshotted from
/// the catalog at add-time, so later catalog changes never reprice an
/// item already in the basket or on a confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl LineItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// How an `add` landed in the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Added {
    /// A new entry was appended.
    New,
    /// An existing entry absorbed the quantity; holds the new quantity.
    Merged { quantity: i32 },
}

/// Ordered collection of line-items. Invariants: no two entries share a
/// `product_id`, and every entry has `quantity >= 1`.
#[derive(Debug, Default)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of `product`. If the product is already in
    /// the basket its quantity is incremented, otherwise a new entry is
    /// appended, preserving insertion order.
    pub fn add(&mut self, product: &Product, quantity: i32) -> Result<Added, DomainError> {
        if quantity < 1 {
            return Err(DomainError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            existing.quantity += quantity;
            return Ok(Added::Merged {
                quantity: existing.quantity,
            });
        }

        self.items.push(LineItem {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price.clone(),
            quantity,
        });
        Ok(Added::New)
    }

    /// Replace the quantity of the entry at `item_no` (1-based).
    pub fn set_quantity(
        &mut self,
        item_no: usize,
        quantity: i32,
    ) -> Result<&LineItem, DomainError> {
        if item_no == 0 || item_no > self.items.len() {
            return Err(DomainError::ItemNotFound(item_no));
        }
        if quantity < 1 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        let item = &mut self.items[item_no - 1];
        item.quantity = quantity;
        Ok(item)
    }

    /// Delete and return the entry at `item_no` (1-based).
    pub fn remove(&mut self, item_no: usize) -> Result<LineItem, DomainError> {
        if item_no == 0 || item_no > self.items.len() {
            return Err(DomainError::ItemNotFound(item_no));
        }
        Ok(self.items.remove(item_no - 1))
    }

    /// Sum of `unit_price * quantity` over all entries; zero when empty.
    pub fn total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.line_total())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str, price: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: BigDecimal::from(price),
        }
    }

    #[test]
    fn empty_basket_totals_zero() {
        let basket = Basket::new();

        assert!(basket.is_empty());
        assert_eq!(basket.total(), BigDecimal::from(0));
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut basket = Basket::new();

        assert_eq!(basket.add(&product(2, "Klawiatura", 120), 1).unwrap(), Added::New);
        assert_eq!(basket.add(&product(1, "Laptop", 2500), 2).unwrap(), Added::New);

        let ids: Vec<i32> = basket.items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn add_same_product_merges_quantities() {
        let mut basket = Basket::new();
        let laptop = product(1, "Laptop", 2500);

        basket.add(&laptop, 2).unwrap();
        let added = basket.add(&laptop, 3).unwrap();

        assert_eq!(added, Added::Merged { quantity: 5 });
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.items()[0].quantity, 5);
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut basket = Basket::new();

        let err = basket.add(&product(1, "Laptop", 2500), 0).unwrap_err();

        assert!(matches!(err, DomainError::InvalidQuantity(0)));
        assert!(basket.is_empty());
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 2).unwrap();
        basket.add(&product(3, "Mysz", 90), 3).unwrap();

        assert_eq!(basket.total(), BigDecimal::from(5270));
    }

    #[test]
    fn set_quantity_replaces_quantity() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 2).unwrap();

        let item = basket.set_quantity(1, 7).unwrap();

        assert_eq!(item.quantity, 7);
    }

    #[test]
    fn set_quantity_out_of_range_does_not_mutate() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 2).unwrap();

        for item_no in [0, 2, 99] {
            let err = basket.set_quantity(item_no, 5).unwrap_err();
            assert!(matches!(err, DomainError::ItemNotFound(_)));
        }
        assert_eq!(basket.items()[0].quantity, 2);
    }

    #[test]
    fn set_quantity_rejects_non_positive_quantity() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 2).unwrap();

        let err = basket.set_quantity(1, -1).unwrap_err();

        assert!(matches!(err, DomainError::InvalidQuantity(-1)));
        assert_eq!(basket.items()[0].quantity, 2);
    }

    #[test]
    fn remove_deletes_the_entry() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 1).unwrap();
        basket.add(&product(3, "Mysz", 90), 1).unwrap();

        let removed = basket.remove(1).unwrap();

        assert_eq!(removed.product_id, 1);
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.items()[0].product_id, 3);
    }

    #[test]
    fn remove_out_of_range_does_not_mutate() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 1).unwrap();

        let err = basket.remove(2).unwrap_err();

        assert!(matches!(err, DomainError::ItemNotFound(2)));
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn clear_empties_the_basket() {
        let mut basket = Basket::new();
        basket.add(&product(1, "Laptop", 2500), 1).unwrap();

        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.total(), BigDecimal::from(0));
    }

    #[test]
    fn snapshot_is_decoupled_from_the_catalog() {
        let mut basket = Basket::new();
        let mut laptop = product(1, "Laptop", 2500);
        basket.add(&laptop, 1).unwrap();

        laptop.price = BigDecimal::from(9999);

        assert_eq!(basket.items()[0].unit_price, BigDecimal::from(2500));
    }
}
