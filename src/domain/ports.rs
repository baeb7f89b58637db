use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::product::Product;

/// Read-only access to the product catalog.
pub trait ProductCatalog {
    fn get_product(&self, id: i32) -> Result<Option<Product>, DomainError>;
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
}

/// Persistence for confirmed orders.
pub trait OrderStore {
    /// Persist a confirmed order and return it with its assigned id.
    fn save(&self, order: &NewOrder) -> Result<Order, DomainError>;
    /// All persisted orders, oldest first.
    fn list_orders(&self) -> Result<Vec<Order>, DomainError>;
    fn get_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;
}
