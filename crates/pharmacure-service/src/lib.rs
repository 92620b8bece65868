//! Cart service for the Pharmacure storefront.
//!
//! [`CartService`] wraps a [`CartStore`](pharmacure_store::CartStore) and
//! enforces the cart's mutation rules:
//!
//! - Adding a product already in the cart increments its quantity; the price
//!   recorded by the first add is kept.
//! - Removing a product decrements its quantity and drops the line at zero.
//! - Removing a product that is not in the cart is a successful no-op.
//!
//! Every operation returns the complete, freshly persisted cart so callers can
//! replace whatever copy they hold instead of merging deltas.

pub mod error;
pub mod service;
pub mod validation;

pub use error::{ServiceError, ServiceResult, ValidationError};
pub use service::CartService;
pub use validation::{validate_price, validate_product};
