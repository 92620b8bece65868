use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("price must be a finite number, got {0}")]
    NonFinitePrice(f64),

    #[error("price must not be negative, got {0}")]
    NegativePrice(f64),
}
