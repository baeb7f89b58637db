use thiserror::Error;

/// Recoverable failures of the checkout flow. None of these are fatal:
/// the caller reports them and the session stays where it was.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Product {0} not found")]
    ProductNotFound(i32),
    #[error("No basket item at position {0}")]
    ItemNotFound(usize),
    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(i32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Could not save the order: {0}")]
    Persistence(String),
}
