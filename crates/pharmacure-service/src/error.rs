use thiserror::Error;

use pharmacure_store::StoreError;
use pharmacure_types::TypeError;

/// Rejected input to a cart operation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("product name must not be empty")]
    EmptyProduct,

    #[error("invalid price: {0}")]
    InvalidPrice(#[from] TypeError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Returns `true` if the caller supplied bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
