pub mod models;
pub mod order_repo;
pub mod product_repo;

use crate::domain::errors::DomainError;

// Error conversions (infrastructure concern only).

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}
